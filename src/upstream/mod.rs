//! Client for the external inference backend.
//!
//! The proxy routes are stateless: every call here is a single HTTP request
//! whose outcome is classified into a reply, an [`UpstreamError`], or a
//! [`BackendState`].

mod error;
mod types;

pub use error::UpstreamError;
pub use types::{BackendReply, ForwardedReply};

use crate::api::types::{BackendState, ChatRequest};
use crate::config::BackendConfig;
use std::time::{Duration, Instant};

/// Forwards chat turns and liveness probes to the inference backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    /// HTTP client with connection pooling
    client: reqwest::Client,
    config: BackendConfig,
    probe_timeout: Duration,
}

impl BackendClient {
    /// Create a backend client with its own pooled HTTP client.
    pub fn new(config: BackendConfig, probe_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self::with_client(config, probe_timeout, client))
    }

    /// Create a backend client with a custom HTTP client (for testing).
    pub fn with_client(
        config: BackendConfig,
        probe_timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            config,
            probe_timeout,
        }
    }

    /// Forward one chat message to `POST {backend}/chat`.
    pub async fn forward_chat(&self, message: &str) -> Result<ForwardedReply, UpstreamError> {
        let start = Instant::now();
        let response = self
            .client
            .post(self.config.chat_url())
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(|e| classify_error(e, self.config.timeout_seconds))?;

        metrics::histogram!("chat_relay_backend_latency_seconds", "endpoint" => "chat")
            .record(start.elapsed().as_secs_f64());

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_error(e, self.config.timeout_seconds))?;
        let reply: BackendReply = serde_json::from_slice(&body)
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;

        self.accept(status.as_u16(), reply)
    }

    /// Decide whether a decoded success body is a usable reply.
    fn accept(&self, status: u16, reply: BackendReply) -> Result<ForwardedReply, UpstreamError> {
        if reply.status.as_deref() == Some("error") {
            return Err(UpstreamError::Reported(
                reply
                    .error
                    .unwrap_or_else(|| "unspecified backend error".to_string()),
            ));
        }

        if let Some(expected) = &self.config.required_source {
            if reply.source.as_deref() != Some(expected.as_str()) {
                return Err(UpstreamError::UnexpectedSource {
                    expected: expected.clone(),
                    actual: reply.source,
                });
            }
        }

        match reply.response {
            Some(response) => Ok(ForwardedReply { status, response }),
            None => Err(UpstreamError::InvalidResponse(
                "missing 'response' field".to_string(),
            )),
        }
    }

    /// Probe `GET {backend}/status`.
    ///
    /// Any success status means connected; the body is not inspected.
    pub async fn probe(&self) -> BackendState {
        let start = Instant::now();
        let result = self
            .client
            .get(self.config.status_url())
            .timeout(self.probe_timeout)
            .send()
            .await;

        match result {
            Ok(response) => {
                metrics::histogram!("chat_relay_backend_latency_seconds", "endpoint" => "status")
                    .record(start.elapsed().as_secs_f64());

                if response.status().is_success() {
                    BackendState::Connected
                } else {
                    tracing::debug!(
                        status = response.status().as_u16(),
                        "Backend status endpoint answered with failure"
                    );
                    BackendState::Disconnected
                }
            }
            Err(e) => {
                let error = classify_error(e, self.probe_timeout.as_secs());
                tracing::debug!(error = %error, "Backend status probe failed");
                BackendState::Error
            }
        }
    }
}

/// Classify reqwest error into UpstreamError.
fn classify_error(e: reqwest::Error, timeout_seconds: u64) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout(timeout_seconds)
    } else {
        UpstreamError::Network(e.to_string())
    }
}
