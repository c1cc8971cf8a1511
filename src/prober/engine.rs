use std::time::Instant;

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::ProbeConfig;
use crate::error::ProbeError;
use crate::http::{HttpClient, RawResponse};
use crate::models::{
    BodyKind, EndpointSpec, ProbeDetail, ProbeOutcome, ProbeResult, UserRecord,
};

pub const PREVIEW_CHARS: usize = 100;

/// Hooks invoked around every probe, in probe order.
pub trait ProbeObserver {
    fn on_start(&mut self, _spec: &EndpointSpec) {}

    fn on_result(&mut self, _spec: &EndpointSpec, _result: &ProbeResult) {}
}

/// Observer that ignores everything.
pub struct Silent;

impl ProbeObserver for Silent {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    General,
    UserListing,
}

pub struct Prober {
    client: HttpClient,
    startup_hint: String,
}

impl Prober {
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::new(&config.base_url, config.timeout_secs)?;

        Ok(Self {
            client,
            startup_hint: config.startup_hint.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Probes every spec once, sequentially. The result vector always has
    /// one entry per spec, in input order.
    pub async fn probe_all(
        &self,
        specs: &[EndpointSpec],
        observer: &mut dyn ProbeObserver,
    ) -> Vec<ProbeResult> {
        let mut results = Vec::with_capacity(specs.len());

        for spec in specs {
            observer.on_start(spec);
            let result = self.probe(spec, Mode::General).await;
            observer.on_result(spec, &result);
            results.push(result);
        }

        results
    }

    /// Probes a user-listing endpoint, reporting 401 as missing credentials
    /// rather than a plain HTTP error.
    pub async fn probe_user_listing(
        &self,
        spec: &EndpointSpec,
        observer: &mut dyn ProbeObserver,
    ) -> ProbeResult {
        let spec = EndpointSpec {
            body: BodyKind::UserList,
            ..spec.clone()
        };

        observer.on_start(&spec);
        let result = self.probe(&spec, Mode::UserListing).await;
        observer.on_result(&spec, &result);
        result
    }

    async fn probe(&self, spec: &EndpointSpec, mode: Mode) -> ProbeResult {
        let start = Instant::now();

        let (outcome, status_code, detail) = match self.client.fetch(spec).await {
            Ok(response) => Self::classify_response(spec, response, mode),
            Err(err) => self.classify_error(err),
        };

        debug!("{} -> {} ({:?})", spec.name, outcome, status_code);

        ProbeResult {
            endpoint_name: spec.name.clone(),
            path: spec.path.clone(),
            outcome,
            status_code,
            detail,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn classify_response(
        spec: &EndpointSpec,
        response: RawResponse,
        mode: Mode,
    ) -> (ProbeOutcome, Option<u16>, ProbeDetail) {
        if response.is_ok() {
            return match spec.body {
                BodyKind::Text => (
                    ProbeOutcome::Success,
                    Some(response.status),
                    ProbeDetail::Preview(preview(&response.body, PREVIEW_CHARS)),
                ),
                BodyKind::UserList => match parse_users(&response.body) {
                    Ok(users) => (
                        ProbeOutcome::Success,
                        Some(response.status),
                        ProbeDetail::Users(users),
                    ),
                    Err(err) => {
                        warn!("{} returned an unreadable user list: {}", spec.path, err);
                        (
                            ProbeOutcome::UnexpectedError,
                            None,
                            ProbeDetail::Failure(err.to_string()),
                        )
                    }
                },
            };
        }

        let detail = if response.status == 401 && mode == Mode::UserListing {
            ProbeDetail::Unauthorized(response.body)
        } else {
            ProbeDetail::ErrorBody(response.body)
        };

        (ProbeOutcome::HttpError, Some(response.status), detail)
    }

    fn classify_error(&self, err: ProbeError) -> (ProbeOutcome, Option<u16>, ProbeDetail) {
        let outcome = err.outcome();
        let detail = match err {
            ProbeError::Connect { url, message } => {
                debug!("connection to {} failed: {}", url, message);
                ProbeDetail::Unreachable {
                    message: format!(
                        "Cannot connect to {} ({}). Make sure the server is running.",
                        self.base_url(),
                        message
                    ),
                    startup_hint: self.startup_hint.clone(),
                }
            }
            other => {
                debug!("request failed: {}", other);
                ProbeDetail::Failure(other.to_string())
            }
        };

        (outcome, None, detail)
    }
}

fn parse_users(body: &str) -> Result<Vec<UserRecord>, ProbeError> {
    Ok(serde_json::from_str(body)?)
}

/// First `limit` characters of `body`, with `...` appended when cut short.
pub fn preview(body: &str, limit: usize) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(limit).collect();

    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
