pub mod catalog;
mod engine;

pub use catalog::EndpointParser;
pub use engine::{PREVIEW_CHARS, ProbeObserver, Prober, Silent, preview};
