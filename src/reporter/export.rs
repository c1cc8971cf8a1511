use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use tera::{Context as TeraContext, Tera};

use crate::models::{ProbeDetail, ProbeOutcome, ProbeResult, ProbeSummary};

/// A probe run as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedReport {
    pub probe_time: String,
    pub base_url: String,
    pub results: Vec<ProbeResult>,
    pub summary: ProbeSummary,
}

impl SavedReport {
    pub fn new(base_url: &str, results: &[ProbeResult]) -> Self {
        Self {
            probe_time: Utc::now().to_rfc3339(),
            base_url: base_url.to_string(),
            results: results.to_vec(),
            summary: ProbeSummary::from_results(results),
        }
    }
}

/// Writes `report` as HTML when `path` ends in `.html`/`.htm`, JSON otherwise.
pub fn write_report(report: &SavedReport, path: &str) -> Result<()> {
    let lower = path.to_lowercase();
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        HtmlExporter::export(report, path)
    } else {
        JsonExporter::export(report, path)
    }
}

pub struct JsonExporter;

impl JsonExporter {
    pub fn export(report: &SavedReport, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        fs::write(path, json).with_context(|| format!("Failed to write to {}", path))?;
        Ok(())
    }

    pub fn load(path: &str) -> Result<SavedReport> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;

        let report: SavedReport = serde_json::from_str(&content)
            .with_context(|| format!("{} is not a saved probe report", path))?;
        Ok(report)
    }
}

pub struct HtmlExporter;

impl HtmlExporter {
    pub fn export(report: &SavedReport, path: &str) -> Result<()> {
        let html = Self::render(report)?;
        fs::write(path, html).with_context(|| format!("Failed to write to {}", path))?;
        Ok(())
    }

    pub fn render(report: &SavedReport) -> Result<String> {
        let mut tera = Tera::default();
        tera.add_raw_template("report.html", TEMPLATE)?;

        let mut context = TeraContext::new();
        context.insert("probe_time", &report.probe_time);
        context.insert("base_url", &report.base_url);
        context.insert("total", &report.summary.total);
        context.insert("succeeded", &report.summary.succeeded);
        context.insert("http_errors", &report.summary.http_errors);
        context.insert("unreachable", &report.summary.unreachable);
        context.insert("unexpected", &report.summary.unexpected);

        let rows: Vec<HtmlRow> = report.results.iter().map(HtmlRow::from_result).collect();
        context.insert("rows", &rows);

        Ok(tera.render("report.html", &context)?)
    }
}

#[derive(Serialize)]
struct HtmlRow {
    endpoint: String,
    path: String,
    code: String,
    outcome: String,
    outcome_class: &'static str,
    detail: String,
    duration_ms: u64,
}

impl HtmlRow {
    fn from_result(result: &ProbeResult) -> Self {
        let outcome_class = match result.outcome {
            ProbeOutcome::Success => "ok",
            ProbeOutcome::HttpError => "http",
            ProbeOutcome::ConnectionFailure => "down",
            ProbeOutcome::UnexpectedError => "unexpected",
        };

        Self {
            endpoint: result.endpoint_name.clone(),
            path: result.path.clone(),
            code: result.code_label(),
            outcome: result.outcome.to_string(),
            outcome_class,
            detail: Self::detail_text(&result.detail),
            duration_ms: result.duration_ms,
        }
    }

    fn detail_text(detail: &ProbeDetail) -> String {
        match detail {
            ProbeDetail::Preview(text) | ProbeDetail::ErrorBody(text) => text.clone(),
            ProbeDetail::Users(users) => format!("{} users", users.len()),
            ProbeDetail::Unauthorized(_) => "Authentication required".to_string(),
            ProbeDetail::Unreachable { message, .. } => message.clone(),
            ProbeDetail::Failure(message) => message.clone(),
        }
    }
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Endpoint Probe Report</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #0d1117; color: #c9d1d9; line-height: 1.6; }
        .container { max-width: 1200px; margin: 0 auto; padding: 2rem; }
        h1 { color: #58a6ff; margin-bottom: 0.5rem; }
        .subtitle { color: #8b949e; margin-bottom: 2rem; }
        .summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 1rem; margin-bottom: 2rem; }
        .stat { background: #161b22; border: 1px solid #30363d; border-radius: 6px; padding: 1rem; text-align: center; }
        .stat-value { font-size: 2rem; font-weight: bold; }
        .stat-label { color: #8b949e; font-size: 0.875rem; }
        .ok .stat-value { color: #3fb950; }
        .http .stat-value { color: #d29922; }
        .down .stat-value, .unexpected .stat-value { color: #f85149; }
        table { width: 100%; border-collapse: collapse; background: #161b22; border: 1px solid #30363d; }
        th, td { padding: 0.75rem 1rem; text-align: left; border-bottom: 1px solid #30363d; }
        th { background: #21262d; font-weight: 600; }
        .outcome { padding: 0.25rem 0.5rem; border-radius: 4px; font-size: 0.75rem; font-weight: 600; }
        .outcome.ok { background: #3fb95033; color: #3fb950; }
        .outcome.http { background: #d2992233; color: #d29922; }
        .outcome.down, .outcome.unexpected { background: #f8514933; color: #f85149; }
        .detail { font-size: 0.875rem; color: #8b949e; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Endpoint Probe Report</h1>
        <p class="subtitle">{{ base_url }} &middot; {{ probe_time }}</p>

        <div class="summary">
            <div class="stat"><div class="stat-value">{{ total }}</div><div class="stat-label">Endpoints</div></div>
            <div class="stat ok"><div class="stat-value">{{ succeeded }}</div><div class="stat-label">Success</div></div>
            <div class="stat http"><div class="stat-value">{{ http_errors }}</div><div class="stat-label">HTTP errors</div></div>
            <div class="stat down"><div class="stat-value">{{ unreachable }}</div><div class="stat-label">No connection</div></div>
            <div class="stat unexpected"><div class="stat-value">{{ unexpected }}</div><div class="stat-label">Unexpected</div></div>
        </div>

        <table>
            <thead>
                <tr><th>Endpoint</th><th>Path</th><th>Code</th><th>Outcome</th><th>Time</th></tr>
            </thead>
            <tbody>
                {% for row in rows %}
                <tr>
                    <td>{{ row.endpoint }}<div class="detail">{{ row.detail }}</div></td>
                    <td>{{ row.path }}</td>
                    <td>{{ row.code }}</td>
                    <td><span class="outcome {{ row.outcome_class }}">{{ row.outcome }}</span></td>
                    <td>{{ row.duration_ms }}ms</td>
                </tr>
                {% endfor %}
            </tbody>
        </table>
    </div>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRecord;

    fn sample() -> Vec<ProbeResult> {
        vec![
            ProbeResult {
                endpoint_name: "Hello".to_string(),
                path: "/api/public/hello".to_string(),
                outcome: ProbeOutcome::Success,
                status_code: Some(200),
                detail: ProbeDetail::Preview("<b>Hello!</b>".to_string()),
                duration_ms: 4,
            },
            ProbeResult {
                endpoint_name: "Users".to_string(),
                path: "/api/public/users".to_string(),
                outcome: ProbeOutcome::Success,
                status_code: Some(200),
                detail: ProbeDetail::Users(vec![UserRecord::default()]),
                duration_ms: 6,
            },
            ProbeResult {
                endpoint_name: "All users".to_string(),
                path: "/api/users/all".to_string(),
                outcome: ProbeOutcome::ConnectionFailure,
                status_code: None,
                detail: ProbeDetail::Unreachable {
                    message: "Cannot connect".to_string(),
                    startup_hint: "mvn spring-boot:run".to_string(),
                },
                duration_ms: 1,
            },
        ]
    }

    #[test]
    fn test_json_export_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let path = path.to_str().unwrap();

        let report = SavedReport::new("http://localhost:8080", &sample());
        JsonExporter::export(&report, path).unwrap();

        let loaded = JsonExporter::load(path).unwrap();
        assert_eq!(loaded.base_url, "http://localhost:8080");
        assert_eq!(loaded.results, report.results);
        assert_eq!(loaded.summary.succeeded, 2);
        assert_eq!(loaded.summary.unreachable, 1);
    }

    #[test]
    fn test_load_rejects_foreign_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.json");
        fs::write(&path, r#"{"hello": "world"}"#).unwrap();

        assert!(JsonExporter::load(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_write_report_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let report = SavedReport::new("http://localhost:8080", &sample());

        let html_path = dir.path().join("run.HTML");
        let htm_path = dir.path().join("run.htm");
        let json_path = dir.path().join("run.json");
        let other_path = dir.path().join("run.out");

        for path in [&html_path, &htm_path, &json_path, &other_path] {
            write_report(&report, path.to_str().unwrap()).unwrap();
        }

        assert!(fs::read_to_string(&html_path).unwrap().starts_with("<!DOCTYPE html>"));
        assert!(fs::read_to_string(&htm_path).unwrap().starts_with("<!DOCTYPE html>"));

        let loaded = JsonExporter::load(json_path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.results.len(), 3);
        let loaded = JsonExporter::load(other_path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.summary.total, 3);
    }

    #[test]
    fn test_html_render() {
        let report = SavedReport::new("http://localhost:8080", &sample());
        let html = HtmlExporter::render(&report).unwrap();

        assert!(html.contains("localhost:8080"));
        assert!(html.contains("&lt;b&gt;Hello!"));
        assert!(!html.contains("<b>Hello!"));
        assert!(html.contains("1 users"));
        assert!(html.contains("outcome down"));
    }
}
