//! Backend liveness passthrough.

use super::types::StatusResponse;
use super::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// GET /status (also GET /chat) - Report whether the backend is reachable.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let backend_state = state.backend.probe().await;

    tracing::debug!(status = %backend_state, "Backend status probed");
    metrics::counter!("chat_relay_probes_total", "status" => backend_state.to_string())
        .increment(1);

    Json(StatusResponse::from(backend_state))
}
