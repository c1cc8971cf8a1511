use anyhow::{Context, Result, bail};
use std::fs;

use crate::models::{BodyKind, EndpointSpec, HttpMethod};

pub const USER_LISTING_PATH: &str = "/api/users/all";

/// The backend's unauthenticated endpoints.
pub fn public_endpoints() -> Vec<EndpointSpec> {
    vec![
        EndpointSpec::get(
            "Public greeting",
            "/api/public/hello",
            "Greeting endpoint without authentication",
        ),
        EndpointSpec::get(
            "Public info",
            "/api/public/info",
            "General platform information",
        ),
        EndpointSpec::get(
            "Public users",
            "/api/public/users",
            "User list without sensitive fields",
        )
        .with_body(BodyKind::UserList),
        EndpointSpec::get("Public stats", "/api/public/stats", "System statistics"),
    ]
}

pub fn user_listing_endpoint(path: Option<&str>) -> Result<EndpointSpec> {
    let path = path.unwrap_or(USER_LISTING_PATH);
    check_path(path)?;

    Ok(EndpointSpec::get(
        "All users",
        path,
        "Full user list (requires authentication)",
    )
    .with_body(BodyKind::UserList))
}

pub struct EndpointParser;

impl EndpointParser {
    /// Parses `"GET /a, HEAD /b"`.
    pub fn parse(input: &str) -> Result<Vec<EndpointSpec>> {
        let mut endpoints = Vec::new();

        for part in input.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }

            let endpoint = Self::parse_single(trimmed)?;
            endpoints.push(endpoint);
        }

        if endpoints.is_empty() {
            bail!("No valid endpoints found in input");
        }

        Ok(endpoints)
    }

    fn parse_single(input: &str) -> Result<EndpointSpec> {
        let parts: Vec<&str> = input.split_whitespace().collect();

        let (method, path) = match parts.as_slice() {
            [path] => (HttpMethod::Get, *path),
            [method, path] => {
                let method = HttpMethod::parse(method).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Unsupported HTTP method: '{}'. Supported: GET, HEAD",
                        method
                    )
                })?;
                (method, *path)
            }
            _ => bail!(
                "Invalid endpoint format: '{}'. Expected 'METHOD /path'",
                input
            ),
        };

        check_path(path)?;
        Ok(EndpointSpec::from_path(method, path.to_string()))
    }

    /// Loads a JSON array of endpoint descriptors.
    pub fn parse_file(path: &str) -> Result<Vec<EndpointSpec>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read endpoint catalog: {}", path))?;

        Self::parse_catalog(&content)
            .with_context(|| format!("Invalid endpoint catalog: {}", path))
    }

    pub fn parse_catalog(content: &str) -> Result<Vec<EndpointSpec>> {
        let endpoints: Vec<EndpointSpec> = serde_json::from_str(content)?;

        if endpoints.is_empty() {
            bail!("Catalog contains no endpoints");
        }
        for endpoint in &endpoints {
            check_path(&endpoint.path)?;
        }

        Ok(endpoints)
    }
}

fn check_path(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        bail!("Path must start with '/': '{}'", path);
    }
    Ok(())
}
