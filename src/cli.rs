use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{DEFAULT_BASE_URL, DEFAULT_STARTUP_HINT, ProbeConfig};

#[derive(Parser)]
#[command(name = "apiprobe")]
#[command(version, about = "Probe a backend's HTTP endpoints and report what answers")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub probe: ProbeArgs,

    /// Defaults to `public` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args)]
pub struct ProbeArgs {
    #[arg(short, long, global = true, env = "APIPROBE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Per-request timeout in seconds
    #[arg(short, long, global = true, default_value = "10")]
    pub timeout: u64,

    /// Command suggested when the server is unreachable
    #[arg(long, global = true, default_value = DEFAULT_STARTUP_HINT)]
    pub start_cmd: String,

    /// Write results to a .json or .html file
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl ProbeArgs {
    pub fn to_config(&self) -> ProbeConfig {
        ProbeConfig::new(self.url.clone())
            .with_timeout(self.timeout)
            .with_startup_hint(self.start_cmd.clone())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe the unauthenticated endpoints
    Public {
        /// Comma-separated list, e.g. "GET /api/public/hello, GET /api/public/info"
        #[arg(short, long, conflicts_with = "catalog")]
        endpoints: Option<String>,

        /// JSON file with an array of endpoint descriptors
        #[arg(short, long)]
        catalog: Option<String>,
    },

    /// Probe the user-listing endpoint
    Users {
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Run `public` then `users`
    All,

    /// Re-render a saved JSON report
    Report {
        #[arg(short, long)]
        input: String,

        #[arg(short, long, value_enum, default_value = "console")]
        format: ReportFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Html,
}
