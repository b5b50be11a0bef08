//! Backend connection polling for a chat session.
//!
//! [`HealthMonitor`] probes the relay on a fixed interval and writes the result
//! into the session's connection status. Probes never block chat turns, and a
//! result only lands if no later-issued probe has already landed.

mod config;
mod error;
mod state;


pub use config::*;
pub use error::*;
pub use state::*;

use crate::relay::ChatTransport;
use crate::session::SessionStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

/// Background service that keeps a session's connection status current.
///
/// Clones share one stop flag: once [`MonitorHandle::stop`] has been called,
/// no clone changes the status again.
#[derive(Clone)]
pub struct HealthMonitor {
    session: Arc<SessionStore>,
    transport: Arc<dyn ChatTransport>,
    config: HealthCheckConfig,
    stopped: CancellationToken,
}

impl HealthMonitor {
    pub fn new(
        session: Arc<SessionStore>,
        transport: Arc<dyn ChatTransport>,
        config: HealthCheckConfig,
    ) -> Self {
        Self {
            session,
            transport,
            config,
            stopped: CancellationToken::new(),
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.is_cancelled()
    }

    /// Probe once right now, outside the regular schedule.
    ///
    /// Returns [`ProbeApply::Stale`] without probing once the monitor is stopped.
    pub async fn check_once(&self) -> ProbeApply {
        let epoch = self.session.connection_epoch();
        self.probe(epoch).await
    }

    async fn probe(&self, epoch: u64) -> ProbeApply {
        // `stop` sets the flag before bumping the epoch; callers read the epoch first
        if self.is_stopped() {
            return ProbeApply::Stale;
        }
        let Some(ticket) = self.session.issue_probe(epoch) else {
            return ProbeApply::Stale;
        };

        let result = self.run_probe().await;
        let outcome = self.session.record_probe(ticket, result);

        match outcome {
            ProbeApply::Changed { from, to } => {
                tracing::info!(
                    old_status = %from,
                    new_status = %to,
                    "Connection status changed"
                );
            }
            ProbeApply::Unchanged(status) => {
                tracing::trace!(status = %status, "Connection status unchanged");
            }
            ProbeApply::Stale => {
                tracing::debug!(probe = ticket.seq(), "Discarded superseded probe result");
            }
        }

        outcome
    }

    /// One bounded status check. Anything but a "connected" answer is disconnected.
    async fn run_probe(&self) -> ProbeResult {
        let timeout = Duration::from_secs(self.config.timeout_seconds);

        let error = match tokio::time::timeout(timeout, self.transport.check_status()).await {
            Ok(Ok(response)) => return ProbeResult::from(response.status),
            Ok(Err(e)) => e,
            Err(_) => ProbeError::Timeout(self.config.timeout_seconds),
        };

        tracing::warn!(error = %error, "Status probe failed");
        ProbeResult::Disconnected
    }

    /// Start polling: one probe immediately, then one per interval.
    ///
    /// Probes run one at a time; a tick that comes due while a probe is still
    /// outstanding is skipped.
    pub fn start(self, cancel_token: CancellationToken) -> MonitorHandle {
        let session = Arc::clone(&self.session);
        let stopped = self.stopped.clone();
        let epoch = session.connection_epoch();
        let task_token = cancel_token.clone();

        let handle = tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(self.config.interval_seconds));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            tracing::info!(
                interval_seconds = self.config.interval_seconds,
                "Health monitor started"
            );

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = self.stopped.cancelled() => break,
                    _ = interval.tick() => {
                        tokio::select! {
                            _ = task_token.cancelled() => break,
                            _ = self.stopped.cancelled() => break,
                            _ = self.probe(epoch) => {}
                        }
                    }
                }
            }

            tracing::info!("Health monitor stopped");
        });

        MonitorHandle {
            session,
            stopped,
            cancel_token,
            handle,
        }
    }
}

/// Controls a running [`HealthMonitor`].
pub struct MonitorHandle {
    session: Arc<SessionStore>,
    stopped: CancellationToken,
    cancel_token: CancellationToken,
    handle: JoinHandle<()>,
}

impl MonitorHandle {
    /// Stop polling. Once this returns, the monitor no longer changes the
    /// connection status: in-flight probes are discarded and later
    /// [`HealthMonitor::check_once`] calls do nothing.
    pub fn stop(&self) {
        self.stopped.cancel();
        self.session.invalidate_probes();
        self.cancel_token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.is_cancelled() || self.cancel_token.is_cancelled()
    }

    /// Stop polling and wait for the background task to finish.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        self.stop();
        self.handle.await
    }
}
