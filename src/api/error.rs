//! Error responses for the relay API.

use super::types::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

/// Message returned when `POST /chat` has no usable `message` field.
pub const MESSAGE_REQUIRED: &str = "Message is required and must be a string";

/// A request the relay refuses before contacting the backend.
///
/// Backend failures never become an `ApiError`; they are answered with a
/// degraded reply instead.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    /// Create a validation error (400).
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: message.to_string(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.body.error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
