use serde::{Deserialize, Serialize};
use std::fmt;

use super::UserRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbeOutcome {
    Success,
    HttpError,
    ConnectionFailure,
    UnexpectedError,
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProbeOutcome::Success => "Success",
            ProbeOutcome::HttpError => "HTTP error",
            ProbeOutcome::ConnectionFailure => "No connection",
            ProbeOutcome::UnexpectedError => "Unexpected error",
        };
        write!(f, "{}", s)
    }
}

impl ProbeOutcome {
    pub fn glyph(&self) -> &'static str {
        match self {
            ProbeOutcome::Success => "✅",
            _ => "❌",
        }
    }
}

/// What the console shows beneath a probed endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ProbeDetail {
    Preview(String),
    Users(Vec<UserRecord>),
    ErrorBody(String),
    Unauthorized(String),
    Unreachable {
        message: String,
        startup_hint: String,
    },
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub endpoint_name: String,
    pub path: String,
    pub outcome: ProbeOutcome,
    pub status_code: Option<u16>,
    pub detail: ProbeDetail,
    pub duration_ms: u64,
}

impl ProbeResult {
    pub fn is_success(&self) -> bool {
        self.outcome == ProbeOutcome::Success
    }

    pub fn code_label(&self) -> String {
        self.status_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeSummary {
    pub total: usize,
    pub succeeded: usize,
    pub http_errors: usize,
    pub unreachable: usize,
    pub unexpected: usize,
    pub duration_ms: u64,
}

impl ProbeSummary {
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            duration_ms: results.iter().map(|r| r.duration_ms).sum(),
            ..Self::default()
        };

        for result in results {
            match result.outcome {
                ProbeOutcome::Success => summary.succeeded += 1,
                ProbeOutcome::HttpError => summary.http_errors += 1,
                ProbeOutcome::ConnectionFailure => summary.unreachable += 1,
                ProbeOutcome::UnexpectedError => summary.unexpected += 1,
            }
        }

        summary
    }

    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }
}
