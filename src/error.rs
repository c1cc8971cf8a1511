use thiserror::Error;

use crate::models::ProbeOutcome;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("cannot connect to {url}: {message}")]
    Connect { url: String, message: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl ProbeError {
    pub fn from_reqwest(err: reqwest::Error, url: &str) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout {
                url: url.to_string(),
            }
        } else if err.is_connect() {
            ProbeError::Connect {
                url: url.to_string(),
                message: root_cause(&err),
            }
        } else if err.is_body() {
            ProbeError::Body(err.to_string())
        } else if err.is_decode() {
            ProbeError::Decode(err.to_string())
        } else {
            ProbeError::Request(err.to_string())
        }
    }

    pub fn outcome(&self) -> ProbeOutcome {
        match self {
            ProbeError::Connect { .. } => ProbeOutcome::ConnectionFailure,
            _ => ProbeOutcome::UnexpectedError,
        }
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        ProbeError::Decode(err.to_string())
    }
}

fn root_cause(err: &(dyn std::error::Error + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_maps_to_connection_failure() {
        let err = ProbeError::Connect {
            url: "http://localhost:8080".to_string(),
            message: "Connection refused".to_string(),
        };
        assert_eq!(err.outcome(), ProbeOutcome::ConnectionFailure);
        assert!(err.to_string().contains("http://localhost:8080"));
    }

    #[test]
    fn test_other_errors_are_unexpected() {
        let timeout = ProbeError::Timeout {
            url: "http://localhost:8080/x".to_string(),
        };
        assert_eq!(timeout.outcome(), ProbeOutcome::UnexpectedError);

        let decode: ProbeError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert_eq!(decode.outcome(), ProbeOutcome::UnexpectedError);
        assert!(decode.to_string().starts_with("failed to decode response"));
    }
}
