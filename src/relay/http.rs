//! HTTP transport against the relay proxy.

use super::{ChatTransport, RelayError};
use crate::api::types::{ChatReply, ChatRequest, StatusResponse};
use crate::health::ProbeError;
use async_trait::async_trait;
use std::time::Duration;

/// Talks to the proxy's `POST /chat` and `GET /chat`.
#[derive(Debug, Clone)]
pub struct HttpRelayClient {
    /// Proxy base URL (e.g., "http://localhost:8000")
    base_url: String,
    client: reqwest::Client,
}

impl HttpRelayClient {
    /// Create a client whose requests give up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Create a client around an existing HTTP client (for testing).
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }
}

#[async_trait]
impl ChatTransport for HttpRelayClient {
    async fn send(&self, text: &str) -> Result<String, RelayError> {
        let response = self
            .client
            .post(self.chat_url())
            .json(&ChatRequest {
                message: text.to_string(),
            })
            .send()
            .await
            .map_err(|e| RelayError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::BackendStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RelayError::Unreachable(e.to_string()))?;
        let reply: ChatReply = serde_json::from_slice(&body)
            .map_err(|e| RelayError::MalformedResponse(e.to_string()))?;

        Ok(reply.response)
    }

    async fn check_status(&self) -> Result<StatusResponse, ProbeError> {
        let response = self
            .client
            .get(self.chat_url())
            .send()
            .await
            .map_err(|e| ProbeError::Unreachable(e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| ProbeError::Unreachable(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| ProbeError::Malformed(e.to_string()))
    }
}
