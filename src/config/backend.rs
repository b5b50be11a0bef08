//! Inference backend configuration

use serde::{Deserialize, Serialize};

/// Where the proxy forwards chat turns and liveness probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the inference service (e.g., "http://localhost:5000")
    pub url: String,
    /// Timeout for a forwarded chat request
    pub timeout_seconds: u64,
    /// When set, replies whose `source` field differs are rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_source: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5000".to_string(),
            timeout_seconds: 120,
            required_source: None,
        }
    }
}

impl BackendConfig {
    /// URL of the backend chat endpoint.
    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.url.trim_end_matches('/'))
    }

    /// URL of the backend liveness endpoint.
    pub fn status_url(&self) -> String {
        format!("{}/status", self.url.trim_end_matches('/'))
    }
}
