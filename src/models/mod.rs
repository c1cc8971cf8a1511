mod endpoint;
mod result;
mod user;

pub use endpoint::{BodyKind, EndpointSpec, HttpMethod};
pub use result::{ProbeDetail, ProbeOutcome, ProbeResult, ProbeSummary};
pub use user::UserRecord;
