//! Request and response bodies exchanged with the chat front-end.

use serde::{Deserialize, Serialize};
use std::fmt;

/// `POST /chat` request body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// `POST /chat` response body, for both real and degraded replies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatReply {
    pub response: String,
}

/// Body of a 4xx response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Backend liveness as reported by `GET /status`.
///
/// `Disconnected` means the backend answered with a non-success status;
/// `Error` means the probe never got an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendState {
    Connected,
    Disconnected,
    Error,
}

impl BackendState {
    /// Human-readable line sent alongside the status.
    pub fn describe(&self) -> &'static str {
        match self {
            BackendState::Connected => "Inference backend is ready",
            BackendState::Disconnected => "Inference backend is not available",
            BackendState::Error => "Cannot connect to inference backend",
        }
    }
}

impl fmt::Display for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendState::Connected => f.write_str("connected"),
            BackendState::Disconnected => f.write_str("disconnected"),
            BackendState::Error => f.write_str("error"),
        }
    }
}

/// `GET /status` response body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusResponse {
    pub status: BackendState,
    pub message: String,
}

impl From<BackendState> for StatusResponse {
    fn from(status: BackendState) -> Self {
        Self {
            status,
            message: status.describe().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backend_state_wire_names() {
        assert_eq!(serde_json::to_value(BackendState::Connected).unwrap(), "connected");
        assert_eq!(
            serde_json::to_value(BackendState::Disconnected).unwrap(),
            "disconnected"
        );
        assert_eq!(serde_json::to_value(BackendState::Error).unwrap(), "error");
    }

    #[test]
    fn test_status_response_from_state() {
        let body = StatusResponse::from(BackendState::Error);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Cannot connect to inference backend");
    }

    #[test]
    fn test_chat_request_ignores_extra_fields() {
        let req: ChatRequest =
            serde_json::from_value(json!({"message": "hi", "session": 3})).unwrap();
        assert_eq!(req.message, "hi");
    }

    #[test]
    fn test_chat_reply_requires_response() {
        assert!(serde_json::from_value::<ChatReply>(json!({"reply": "x"})).is_err());
        assert!(serde_json::from_value::<ChatReply>(json!({"response": null})).is_err());
    }
}
