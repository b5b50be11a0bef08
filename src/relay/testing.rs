//! Scripted transports for unit tests.

use super::{ChatTransport, RelayError};
use crate::api::types::{BackendState, StatusResponse};
use crate::health::ProbeError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::{oneshot, Semaphore};

/// Replies and status answers are served in the order they were queued.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<String, RelayError>>>,
    statuses: Mutex<VecDeque<Result<StatusResponse, ProbeError>>>,
    sent: Mutex<Vec<String>>,
    probes: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn with_replies(replies: Vec<Result<String, RelayError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        }
    }

    pub(crate) fn with_statuses(statuses: Vec<Result<BackendState, ProbeError>>) -> Self {
        Self {
            statuses: Mutex::new(
                statuses
                    .into_iter()
                    .map(|s| s.map(StatusResponse::from))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn send(&self, text: &str) -> Result<String, RelayError> {
        self.sent.lock().unwrap().push(text.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("echo: {}", text)))
    }

    async fn check_status(&self) -> Result<StatusResponse, ProbeError> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(StatusResponse::from(BackendState::Connected)))
    }
}

/// Calls block until the test releases them.
pub(crate) struct GatedTransport {
    sends_started: AtomicUsize,
    send_gate: Semaphore,
    probes_started: AtomicUsize,
    probe_answers: Mutex<VecDeque<oneshot::Receiver<Result<StatusResponse, ProbeError>>>>,
}

impl GatedTransport {
    pub(crate) fn new() -> Self {
        Self {
            sends_started: AtomicUsize::new(0),
            send_gate: Semaphore::new(0),
            probes_started: AtomicUsize::new(0),
            probe_answers: Mutex::new(VecDeque::new()),
        }
    }

    /// Let one blocked `send` through.
    pub(crate) fn release_send(&self) {
        self.send_gate.add_permits(1);
    }

    pub(crate) fn sends_started(&self) -> usize {
        self.sends_started.load(Ordering::SeqCst)
    }

    /// Queue the answer channel for the next `check_status` call.
    pub(crate) fn next_probe(&self) -> oneshot::Sender<Result<StatusResponse, ProbeError>> {
        let (tx, rx) = oneshot::channel();
        self.probe_answers.lock().unwrap().push_back(rx);
        tx
    }

    pub(crate) fn probes_started(&self) -> usize {
        self.probes_started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatTransport for GatedTransport {
    async fn send(&self, text: &str) -> Result<String, RelayError> {
        self.sends_started.fetch_add(1, Ordering::SeqCst);
        let permit = self
            .send_gate
            .acquire()
            .await
            .map_err(|e| RelayError::Unreachable(e.to_string()))?;
        permit.forget();
        Ok(format!("gated: {}", text))
    }

    async fn check_status(&self) -> Result<StatusResponse, ProbeError> {
        let answer = self.probe_answers.lock().unwrap().pop_front();
        self.probes_started.fetch_add(1, Ordering::SeqCst);
        match answer {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ProbeError::Unreachable("answer dropped".to_string()))),
            None => std::future::pending().await,
        }
    }
}

/// Yield to other tasks until `condition` holds.
pub(crate) async fn wait_until(condition: impl Fn() -> bool) {
    for _ in 0..10_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
