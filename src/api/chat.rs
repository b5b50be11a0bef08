//! Chat relay endpoint handler.

use super::error::{ApiError, MESSAGE_REQUIRED};
use super::fallback::pick_fallback;
use super::types::ChatReply;
use super::AppState;
use crate::logging::{generate_request_id, truncate_content};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// POST /chat - Forward one message to the backend.
///
/// Backend failures are answered with a 503 carrying a fallback reply, never
/// with an error body.
pub async fn handle(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request_id = generate_request_id();

    let message = match extract_message(&body) {
        Ok(message) => message,
        Err(e) => {
            warn!(request_id = %request_id, "Rejected chat request without a message");
            metrics::counter!("chat_relay_requests_total", "status" => "400").increment(1);
            return e.into_response();
        }
    };

    info!(
        request_id = %request_id,
        message_len = message.chars().count(),
        content = ?truncate_content(&message, state.config.logging.enable_content_logging),
        "Chat request"
    );

    match state.backend.forward_chat(&message).await {
        Ok(reply) => {
            let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::OK);
            info!(request_id = %request_id, status = reply.status, "Backend replied");
            metrics::counter!("chat_relay_requests_total", "status" => status.as_u16().to_string())
                .increment(1);

            (
                status,
                Json(ChatReply {
                    response: reply.response,
                }),
            )
                .into_response()
        }
        Err(e) => {
            warn!(
                request_id = %request_id,
                error = %e,
                reason = e.reason(),
                "Backend unavailable, serving fallback reply"
            );
            metrics::counter!("chat_relay_requests_total", "status" => "503").increment(1);
            metrics::counter!("chat_relay_fallbacks_total", "reason" => e.reason()).increment(1);

            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ChatReply {
                    response: pick_fallback(&state.config.fallback.responses).to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Pull a non-empty string `message` out of a JSON body.
///
/// The content type is not checked; any body that parses as JSON is accepted.
fn extract_message(body: &[u8]) -> Result<String, ApiError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|_| ApiError::bad_request(MESSAGE_REQUIRED))?;

    match value.get("message") {
        Some(Value::String(message)) if !message.is_empty() => Ok(message.clone()),
        _ => Err(ApiError::bad_request(MESSAGE_REQUIRED)),
    }
}
