//! # Relay API
//!
//! Stateless HTTP boundary between the chat front-end and the inference backend.
//!
//! ## Endpoints
//!
//! - `POST /chat` - Forward a message; `{response}` on success, `{response}`
//!   with 503 when the backend is down, `{error}` with 400 on bad input
//! - `GET /chat`, `GET /status` - Backend liveness: `{status, message}`
//! - `GET /metrics` - Prometheus metrics
//!
//! ## Example
//!
//! ```no_run
//! use chat_relay::api::{create_router, AppState};
//! use chat_relay::config::RelayConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(RelayConfig::default());
//! let state = Arc::new(AppState::new(config)?);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

mod chat;
pub mod error;
pub mod fallback;
mod status;
pub mod types;

pub use error::ApiError;
pub use types::*;

use crate::config::RelayConfig;
use crate::upstream::BackendClient;
use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (1 MB).
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared application state accessible to all handlers.
///
/// Holds configuration and clients only; no conversation state lives here.
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub backend: BackendClient,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    pub prometheus_handle: PrometheusHandle,
}

impl AppState {
    /// Create application state for the given configuration.
    pub fn new(config: Arc<RelayConfig>) -> Result<Self, reqwest::Error> {
        let backend = BackendClient::new(
            config.backend.clone(),
            Duration::from_secs(config.health_check.timeout_seconds),
        )?;

        // Safe to call repeatedly (e.g., in tests): reuse a detached handle when a
        // global recorder is already installed.
        let prometheus_handle = crate::metrics::setup_metrics().unwrap_or_else(|e| {
            tracing::debug!("Metrics already initialized, creating new handle: {}", e);
            crate::metrics::PrometheusBuilder::new()
                .build_recorder()
                .handle()
        });

        Ok(Self {
            config,
            backend,
            start_time: Instant::now(),
            prometheus_handle,
        })
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat", post(chat::handle).get(status::handle))
        .route("/status", get(status::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
