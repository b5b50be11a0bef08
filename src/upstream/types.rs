//! Body shapes spoken by the inference backend.

use serde::Deserialize;

/// `POST {backend}/chat` success body: `{response, status?, source?}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendReply {
    pub response: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A reply accepted from the backend, ready to pass through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedReply {
    /// Backend's success status code
    pub status: u16,
    pub response: String,
}
