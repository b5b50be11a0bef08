//! # Metrics Collection Module
//!
//! Prometheus export of relay counters at `GET /metrics`.
//!
//! **Counters:**
//! - `chat_relay_requests_total{status}` - Chat requests by response status
//! - `chat_relay_fallbacks_total{reason}` - Fallback replies by failure reason
//! - `chat_relay_probes_total{status}` - Status probes by result
//!
//! **Histograms:**
//! - `chat_relay_backend_latency_seconds{endpoint}` - Backend round-trip time

pub mod handler;

// Re-export PrometheusBuilder for test compatibility
pub use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the global Prometheus recorder.
///
/// Latency buckets are in seconds and skewed towards slow model replies.
/// Fails if a recorder is already installed.
pub fn setup_metrics(
) -> Result<metrics_exporter_prometheus::PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::Matcher;

    let latency_buckets = &[0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("chat_relay_backend_latency_seconds".to_string()),
            latency_buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}
