//! Errors raised while talking to the inference backend.

use thiserror::Error;

/// Why a forwarded chat turn did not produce a usable reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// Request exceeded the configured backend timeout.
    #[error("backend request timed out after {0}s")]
    Timeout(u64),

    /// DNS, connection refused, reset, and similar.
    #[error("backend unreachable: {0}")]
    Network(String),

    /// Backend answered with a non-success status code.
    #[error("backend responded with status {0}")]
    Status(u16),

    /// Success status, but the body is not a chat reply.
    #[error("invalid backend response: {0}")]
    InvalidResponse(String),

    /// Success status, but the body carries `status: "error"`.
    #[error("backend reported an error: {0}")]
    Reported(String),

    /// `source` did not match `backend.required_source`.
    #[error("reply source {actual:?} does not match required source '{expected}'")]
    UnexpectedSource {
        expected: String,
        actual: Option<String>,
    },
}

impl UpstreamError {
    /// Short label used for metrics and log fields.
    pub fn reason(&self) -> &'static str {
        match self {
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Network(_) => "unreachable",
            UpstreamError::Status(_) => "backend_status",
            UpstreamError::InvalidResponse(_) => "invalid_response",
            UpstreamError::Reported(_) => "backend_error",
            UpstreamError::UnexpectedSource { .. } => "unexpected_source",
        }
    }
}
