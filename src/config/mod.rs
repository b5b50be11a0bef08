//! Configuration module for the chat relay
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`CHAT_RELAY_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use chat_relay::config::RelayConfig;
//!
//! let config = RelayConfig::default();
//! assert_eq!(config.server.port, 8000);
//!
//! let toml = r#"
//! [backend]
//! url = "http://10.0.0.5:5000"
//! "#;
//! let config: RelayConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.backend.url, "http://10.0.0.5:5000");
//! ```

pub mod backend;
pub mod error;
pub mod fallback;
pub mod logging;
pub mod server;
pub mod session;

pub use backend::BackendConfig;
pub use error::ConfigError;
pub use fallback::{FallbackConfig, DEFAULT_FALLBACK_RESPONSES};
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use session::SessionConfig;

// Re-export HealthCheckConfig from health module
pub use crate::health::HealthCheckConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the proxy server and the chat front-end.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Inference backend the proxy forwards to
    pub backend: BackendConfig,
    /// Connection polling for the chat session
    pub health_check: HealthCheckConfig,
    /// Degraded replies served when the backend is down
    pub fallback: FallbackConfig,
    /// Chat session settings
    pub session: SessionConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl RelayConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(Some(path))
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("CHAT_RELAY_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("CHAT_RELAY_HOST") {
            self.server.host = host;
        }
        if let Ok(url) = std::env::var("CHAT_RELAY_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Ok(url) = std::env::var("CHAT_RELAY_PROXY_URL") {
            self.session.proxy_url = url;
        }

        if let Ok(level) = std::env::var("CHAT_RELAY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CHAT_RELAY_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(health) = std::env::var("CHAT_RELAY_HEALTH_CHECK") {
            self.health_check.enabled = health.to_lowercase() == "true";
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(validation("server.port", "port must be non-zero"));
        }
        if self.backend.url.trim().is_empty() {
            return Err(validation("backend.url", "URL cannot be empty"));
        }
        if self.session.proxy_url.trim().is_empty() {
            return Err(validation("session.proxy_url", "URL cannot be empty"));
        }
        if self.health_check.interval_seconds == 0 {
            return Err(validation(
                "health_check.interval_seconds",
                "interval must be non-zero",
            ));
        }
        for (field, seconds) in [
            ("backend.timeout_seconds", self.backend.timeout_seconds),
            ("health_check.timeout_seconds", self.health_check.timeout_seconds),
            (
                "session.request_timeout_seconds",
                self.session.request_timeout_seconds,
            ),
        ] {
            if seconds == 0 {
                return Err(validation(field, "timeout must be non-zero"));
            }
        }

        if self.fallback.responses.is_empty() {
            return Err(validation(
                "fallback.responses",
                "at least one fallback response is required",
            ));
        }
        if let Some(i) = self
            .fallback
            .responses
            .iter()
            .position(|r| r.trim().is_empty())
        {
            return Err(validation(
                &format!("fallback.responses[{}]", i),
                "fallback response cannot be blank",
            ));
        }

        for (field, text) in [
            ("session.empty_reply", &self.session.empty_reply),
            ("session.failure_reply", &self.session.failure_reply),
        ] {
            if text.trim().is_empty() {
                return Err(validation(field, "reply text cannot be blank"));
            }
        }

        Ok(())
    }
}

fn validation(field: &str, message: &str) -> ConfigError {
    ConfigError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Serializes tests that read or write `CHAT_RELAY_*` variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
