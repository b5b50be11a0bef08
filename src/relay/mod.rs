//! Client side of the relay: one chat turn or one status check per call.
//!
//! [`ChatTransport`] is the seam between the session state machine and the
//! network. [`HttpRelayClient`] is the production implementation; tests
//! substitute scripted transports.

mod error;
mod http;

#[cfg(test)]
pub(crate) mod testing;

pub use error::RelayError;
pub use http::HttpRelayClient;

use crate::api::types::StatusResponse;
use crate::health::ProbeError;
use async_trait::async_trait;

/// Transport used by the chat session.
///
/// Implementations make exactly one attempt per call; retry policy belongs to
/// the caller.
#[async_trait]
pub trait ChatTransport: Send + Sync + 'static {
    /// Send one user message and return the reply text.
    async fn send(&self, text: &str) -> Result<String, RelayError>;

    /// Ask the relay whether the backend is reachable.
    async fn check_status(&self) -> Result<StatusResponse, ProbeError>;
}
