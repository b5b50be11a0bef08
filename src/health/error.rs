//! Error types for health probing.

use thiserror::Error;

/// Failure of a liveness probe itself (as opposed to a "disconnected" answer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The proxy could not be reached
    #[error("status endpoint unreachable: {0}")]
    Unreachable(String),

    /// The probe did not finish in time
    #[error("status probe timed out after {0}s")]
    Timeout(u64),

    /// The proxy answered with something other than a status payload
    #[error("invalid status payload: {0}")]
    Malformed(String),
}
