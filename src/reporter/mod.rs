mod console;
mod export;
pub mod hints;

pub use console::ConsoleReporter;
pub use export::{HtmlExporter, JsonExporter, SavedReport, write_report};
