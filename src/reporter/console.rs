use std::time::Duration;

use chrono::{DateTime, Local};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::hints::{startup_guidance, unauthorized_guidance};
use crate::models::{
    EndpointSpec, ProbeDetail, ProbeOutcome, ProbeResult, ProbeSummary, UserRecord,
};
use crate::prober::ProbeObserver;

/// Prints probe progress as it happens and the report blocks afterwards.
pub struct ConsoleReporter {
    base_url: String,
    user_details: bool,
    spinner: Option<ProgressBar>,
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Endpoint")]
    endpoint: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Time")]
    time: String,
}

impl ConsoleReporter {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            user_details: false,
            spinner: None,
        }
    }

    /// Shows every field of listed users instead of one line each.
    pub fn with_user_details(mut self, enabled: bool) -> Self {
        self.user_details = enabled;
        self
    }

    pub fn render_header(&self, title: &str, started: DateTime<Local>) -> String {
        [
            format!("🚀 {}", title.bold()),
            "=".repeat(50),
            format!("🌐 Base URL: {}", self.base_url),
            format!("⏰ Started: {}", started.format("%Y-%m-%d %H:%M:%S")),
        ]
        .join("\n")
    }

    pub fn render_start(spec: &EndpointSpec) -> Vec<String> {
        let mut lines = vec![
            format!("🔍 Probing: {}", spec.name.bold()),
            format!("   📍 URL: {}", spec.path),
        ];
        if !spec.description.is_empty() {
            lines.push(format!("   📝 Description: {}", spec.description));
        }
        lines
    }

    pub fn render_outcome(&self, result: &ProbeResult) -> Vec<String> {
        let mut lines = Vec::new();

        match &result.detail {
            ProbeDetail::Preview(text) => {
                lines.push(Self::status_line(result));
                lines.push(format!("   📄 Response: {}", text));
            }
            ProbeDetail::Users(users) => {
                lines.push(Self::status_line(result));
                lines.push(format!("   👥 Users found: {}", users.len()));
                if self.user_details {
                    for (i, user) in users.iter().enumerate() {
                        lines.extend(Self::user_block(i + 1, user));
                    }
                } else {
                    for (i, user) in users.iter().enumerate() {
                        lines.push(Self::user_line(i + 1, user));
                    }
                }
            }
            ProbeDetail::ErrorBody(body) => {
                lines.push(Self::status_line(result));
                lines.push(format!("   📄 Response: {}", body));
            }
            ProbeDetail::Unauthorized(_) => {
                lines.push(format!(
                    "   ❌ Status: {} ({})",
                    result.code_label(),
                    "Unauthorized".red()
                ));
                lines.extend(
                    unauthorized_guidance(&self.base_url)
                        .into_iter()
                        .map(|l| format!("   {}", l)),
                );
            }
            ProbeDetail::Unreachable {
                message,
                startup_hint,
            } => {
                lines.push(format!("   ❌ Error: {}", message.red()));
                lines.extend(
                    startup_guidance(startup_hint)
                        .into_iter()
                        .map(|l| format!("   {}", l)),
                );
            }
            ProbeDetail::Failure(message) => {
                lines.push(format!("   ❌ Unexpected error: {}", message.red()));
            }
        }

        lines
    }

    fn status_line(result: &ProbeResult) -> String {
        let label = if result.is_success() {
            "Success".green()
        } else {
            "Error".red()
        };
        format!(
            "   {} Status: {} ({})",
            result.outcome.glyph(),
            result.code_label(),
            label
        )
    }

    pub fn user_line(index: usize, user: &UserRecord) -> String {
        format!("      {}. {} ({})", index, user.display_name(), user.role())
    }

    fn user_block(index: usize, user: &UserRecord) -> Vec<String> {
        vec![
            format!("   👤 User {}:", index),
            format!("      📧 Email: {}", user.email()),
            format!("      👤 Name: {}", user.user_name()),
            format!("      📝 Last name: {}", user.last_name()),
            format!("      🏷️  Role: {}", user.role()),
            format!("      ✅ Active: {}", user.active_label()),
            format!("      📅 Created: {}", user.created_at()),
        ]
    }

    /// One `<glyph> <name> (code: <status>)` line per result, in order.
    pub fn render_summary(results: &[ProbeResult]) -> String {
        results
            .iter()
            .map(|r| {
                format!(
                    "{} {} (code: {})",
                    r.outcome.glyph(),
                    r.endpoint_name,
                    r.code_label()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn print_header(&self, title: &str) {
        println!("{}", self.render_header(title, Local::now()));
        println!();
    }

    pub fn print_summary(&self, results: &[ProbeResult]) {
        let summary = ProbeSummary::from_results(results);

        println!("{}", "📊 Probe summary".bold().underline());
        println!("{}", "=".repeat(30));
        println!("{}", Self::render_summary(results));
        println!();
        println!(
            "{} endpoints probed in {:.2}s: {} ok, {} failed",
            summary.total,
            summary.duration_ms as f64 / 1000.0,
            summary.succeeded.to_string().green(),
            summary.failed().to_string().red()
        );
        println!();
    }

    pub fn render_table(results: &[ProbeResult]) -> String {
        let rows: Vec<TableRow> = results
            .iter()
            .map(|r| {
                let outcome = match r.outcome {
                    ProbeOutcome::Success => r.outcome.to_string().green().to_string(),
                    ProbeOutcome::HttpError => r.outcome.to_string().yellow().to_string(),
                    _ => r.outcome.to_string().red().to_string(),
                };

                TableRow {
                    endpoint: r.endpoint_name.clone(),
                    path: r.path.clone(),
                    code: r.code_label(),
                    outcome,
                    time: format!("{}ms", r.duration_ms),
                }
            })
            .collect();

        Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .to_string()
    }

    pub fn print_table(&self, results: &[ProbeResult]) {
        println!("\n{}", Self::render_table(results));
        println!();
    }

    fn start_spinner(&mut self, spec: &EndpointSpec) {
        let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("   {spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("{} {}{}", spec.method, self.base_url, spec.path));
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }
}

impl ProbeObserver for ConsoleReporter {
    fn on_start(&mut self, spec: &EndpointSpec) {
        for line in Self::render_start(spec) {
            println!("{}", line);
        }
        self.start_spinner(spec);
    }

    fn on_result(&mut self, _spec: &EndpointSpec, result: &ProbeResult) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }

        for line in self.render_outcome(result) {
            println!("{}", line);
        }
        println!();
    }
}
