use anyhow::{Context, Result, bail};
use reqwest::{Client, Method, Url};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::ProbeError;
use crate::models::{EndpointSpec, HttpMethod};

/// Status and body of a completed request, whatever the status was.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();

        let parsed = Url::parse(&base_url)
            .with_context(|| format!("Invalid base URL: {}", base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("Base URL must use http or https: '{}'", base_url);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("apiprobe/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, spec: &EndpointSpec) -> String {
        format!("{}{}", self.base_url, spec.path)
    }

    pub async fn fetch(&self, spec: &EndpointSpec) -> Result<RawResponse, ProbeError> {
        let start = Instant::now();
        let url = self.url_for(spec);

        debug!("{} {}", spec.method, url);

        let response = self
            .client
            .request(Self::to_reqwest_method(spec.method), &url)
            .header("Accept", "application/json, */*")
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(e, &url))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProbeError::from_reqwest(e, &url))?;

        debug!(
            "{} {} -> {} in {}ms",
            spec.method,
            url,
            status,
            start.elapsed().as_millis()
        );

        Ok(RawResponse { status, body })
    }

    fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Head => Method::HEAD,
        }
    }
}
