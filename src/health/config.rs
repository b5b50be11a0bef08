//! Configuration for connection polling.

use serde::{Deserialize, Serialize};

/// Configuration for the session's backend health polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Whether polling runs at all
    pub enabled: bool,
    /// Seconds between probes
    pub interval_seconds: u64,
    /// Upper bound on a single probe; a slower probe counts as disconnected
    pub timeout_seconds: u64,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 30,
            timeout_seconds: 5,
        }
    }
}
