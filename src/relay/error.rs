//! Error types for relaying a chat turn.

use thiserror::Error;

/// Why a chat turn produced no reply.
///
/// The session turns every variant into the same user-facing failure text;
/// the detail exists for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Network-level failure: refused, reset, DNS, timeout.
    #[error("relay unreachable: {0}")]
    Unreachable(String),

    /// The proxy answered with a non-success status.
    #[error("relay responded with status {0}")]
    BackendStatus(u16),

    /// Success status without a string `response` field.
    #[error("malformed relay response: {0}")]
    MalformedResponse(String),
}
