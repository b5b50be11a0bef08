//! Degraded-reply configuration

use serde::{Deserialize, Serialize};

/// Replies served with a 503 when the backend cannot answer.
pub const DEFAULT_FALLBACK_RESPONSES: [&str; 4] = [
    "I'm having trouble connecting to my neural network right now. Please make sure the inference server is running.",
    "The AI model is currently offline. Please check if the inference backend is running.",
    "Connection error: Unable to reach the neural network. Try restarting the inference server.",
    "Technical difficulties detected. The model server needs to be restarted.",
];

/// Fallback reply configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub responses: Vec<String>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            responses: DEFAULT_FALLBACK_RESPONSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
