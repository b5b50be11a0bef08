//! Shared test utilities for chat-relay integration tests.
//!
//! Provides helpers for building the proxy against a mock backend and for
//! running it on a real socket.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use chat_relay::api::{create_router, AppState};
use chat_relay::config::RelayConfig;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Config and App Builders
// =============================================================================

/// Default config pointed at `backend_url`, with short timeouts.
pub fn config_for_backend(backend_url: &str) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.backend.url = backend_url.to_string();
    config.backend.timeout_seconds = 5;
    config.health_check.timeout_seconds = 2;
    config
}

/// Router for a config.
pub fn app_for_config(config: RelayConfig) -> axum::Router {
    let state = Arc::new(AppState::new(Arc::new(config)).unwrap());
    create_router(state)
}

/// Router forwarding to `backend_url`.
pub fn app_for_backend(backend_url: &str) -> axum::Router {
    app_for_config(config_for_backend(backend_url))
}

/// URL where nothing listens.
pub fn unreachable_url() -> String {
    "http://127.0.0.1:1".to_string()
}

// =============================================================================
// Running Proxy
// =============================================================================

/// A proxy listening on an ephemeral local port.
pub struct RunningProxy {
    pub url: String,
    handle: JoinHandle<()>,
}

impl Drop for RunningProxy {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serve the relay on 127.0.0.1 with an OS-assigned port.
pub async fn spawn_proxy(backend_url: &str) -> RunningProxy {
    let app = app_for_backend(backend_url);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    RunningProxy {
        url: format!("http://{}", addr),
        handle,
    }
}

// =============================================================================
// Mock Backend
// =============================================================================

/// Mock backend whose `/chat` answers `{"response": reply}` and whose
/// `/status` answers 200.
pub async fn backend_replying(reply: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": reply,
            "status": "success",
            "source": "neural_network"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ready"
        })))
        .mount(&server)
        .await;
    server
}

// =============================================================================
// Requests and Bodies
// =============================================================================

pub fn post_chat(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Poll `condition` until it holds or `timeout` passes.
pub async fn eventually(timeout: Duration, condition: impl Fn() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
