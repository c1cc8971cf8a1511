use serde::{Deserialize, Serialize};

const NOT_AVAILABLE: &str = "N/A";

/// A user entry as served by the backend's listing endpoints. The server owns
/// the shape, so every field is optional and unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub email: Option<String>,
    pub user_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<String>,
}

impl UserRecord {
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn user_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn role(&self) -> &str {
        self.role.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn created_at(&self) -> &str {
        self.created_at.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn active_label(&self) -> &'static str {
        if self.is_active.unwrap_or(false) {
            "Yes"
        } else {
            "No"
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.user_name(), self.last_name())
    }
}
