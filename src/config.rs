use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_STARTUP_HINT: &str = "mvn spring-boot:run";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Shown when the server cannot be reached.
    pub startup_hint: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            startup_hint: DEFAULT_STARTUP_HINT.to_string(),
        }
    }
}

impl ProbeConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_startup_hint(mut self, hint: impl Into<String>) -> Self {
        self.startup_hint = hint.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            bail!(
                "Base URL must start with http:// or https://: '{}'",
                self.base_url
            );
        }

        if self.timeout_secs == 0 {
            bail!("Timeout must be at least 1 second");
        }

        if self.startup_hint.trim().is_empty() {
            bail!("Startup command hint cannot be empty");
        }

        Ok(())
    }
}
