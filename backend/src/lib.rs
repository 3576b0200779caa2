//! Task rate API library: domain, adapters and settings.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
