//! Readiness check against the backing store.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Failure reported when the store cannot answer a probe.
    pub enum StoreProbeError {
        /// The store did not answer.
        Unavailable { message: String } => "store unavailable: {message}",
    }
}

/// Cheap round trip used by the readiness endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreProbe: Send + Sync {
    /// Succeeds when the store accepts queries.
    async fn ping(&self) -> Result<(), StoreProbeError>;
}
