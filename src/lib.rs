pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod prober;
pub mod reporter;

pub use config::ProbeConfig;
pub use error::ProbeError;
pub use models::{
    BodyKind, EndpointSpec, HttpMethod, ProbeDetail, ProbeOutcome, ProbeResult, ProbeSummary,
    UserRecord,
};
pub use prober::{EndpointParser, ProbeObserver, Prober};
pub use reporter::{ConsoleReporter, HtmlExporter, JsonExporter, SavedReport, write_report};
