//! Chat session configuration

use serde::{Deserialize, Serialize};

/// Settings for the client-side chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Base URL of the relay proxy the session talks to
    pub proxy_url: String,
    /// Timeout for a single chat turn against the proxy
    pub request_timeout_seconds: u64,
    /// Synthetic bot message every session starts with
    pub welcome_message: String,
    /// Substituted when the backend answers with an empty string
    pub empty_reply: String,
    /// Shown when a turn fails for any reason
    pub failure_reply: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            proxy_url: "http://localhost:8000".to_string(),
            request_timeout_seconds: 130,
            welcome_message: "Neural network relay ready. Type a message to start chatting!"
                .to_string(),
            empty_reply: "I'm having trouble generating a response right now.".to_string(),
            failure_reply: "Sorry, I'm having technical difficulties. Please try again."
                .to_string(),
        }
    }
}
