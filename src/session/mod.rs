//! Chat session state machine.
//!
//! [`SessionStore`] owns the conversation and enforces one turn in flight at a
//! time. Every submitted user message is followed by exactly one bot message,
//! whether the relay answered, failed, or the turn was abandoned.

mod error;
mod message;


pub use error::ValidationError;
pub use message::{Message, MessageId, Role};

use crate::config::SessionConfig;
use crate::health::{ConnectionState, ConnectionStatus, ProbeApply, ProbeResult, ProbeTicket};
use crate::relay::ChatTransport;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Result of a [`SessionStore::submit`] call that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The turn completed; this bot message was appended
    Replied(Message),
    /// Another turn was in flight, nothing changed
    Busy,
}

/// Point-in-time copy of the session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    pub pending_input: String,
    pub is_awaiting_response: bool,
    pub connection_status: ConnectionStatus,
}

struct SessionState {
    messages: Vec<Message>,
    pending_input: String,
    awaiting_response: bool,
    next_id: u64,
    connection: ConnectionState,
}

impl SessionState {
    fn push(&mut self, role: Role, content: String) -> Message {
        let message = Message::new(MessageId::new(self.next_id), role, content);
        self.next_id += 1;
        self.messages.push(message.clone());
        message
    }
}

/// Ordered history plus the turn-submission state machine.
///
/// State sits behind a mutex that is never held across an `.await`, so each
/// transition is atomic from the caller's point of view.
pub struct SessionStore {
    transport: Arc<dyn ChatTransport>,
    empty_reply: String,
    failure_reply: String,
    state: Mutex<SessionState>,
}

impl SessionStore {
    /// Start a session seeded with the configured welcome message.
    pub fn new(transport: Arc<dyn ChatTransport>, config: &SessionConfig) -> Self {
        let mut state = SessionState {
            messages: Vec::new(),
            pending_input: String::new(),
            awaiting_response: false,
            next_id: 0,
            connection: ConnectionState::default(),
        };
        state.push(Role::Bot, config.welcome_message.clone());

        Self {
            transport,
            empty_reply: config.empty_reply.clone(),
            failure_reply: config.failure_reply.clone(),
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // Every transition leaves the state consistent, so a poisoned lock is still usable
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Submit one user message and wait for the bot's answer.
    ///
    /// - Another turn in flight: `Ok(SubmitOutcome::Busy)`, nothing changes.
    /// - Blank text: `Err(ValidationError::EmptyMessage)`, nothing changes.
    /// - Otherwise the trimmed text is appended as a user message, the draft is
    ///   cleared, and exactly one bot message is appended once the transport
    ///   returns. Transport failures become the configured failure reply.
    pub async fn submit(&self, text: &str) -> Result<SubmitOutcome, ValidationError> {
        let content = text.trim();
        {
            let mut state = self.lock();
            if state.awaiting_response {
                debug!("Turn already in flight, ignoring submit");
                return Ok(SubmitOutcome::Busy);
            }
            if content.is_empty() {
                return Err(ValidationError::EmptyMessage);
            }

            let message = state.push(Role::User, content.to_string());
            state.pending_input.clear();
            state.awaiting_response = true;
            debug!(message_id = %message.id, "User message appended");
        }

        let turn = TurnGuard {
            store: self,
            finished: false,
        };

        let reply = match self.transport.send(content).await {
            Ok(text) if text.trim().is_empty() => {
                debug!("Backend returned an empty reply, using placeholder");
                self.empty_reply.clone()
            }
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Chat turn failed");
                self.failure_reply.clone()
            }
        };

        Ok(SubmitOutcome::Replied(turn.finish(reply)))
    }

    /// Submit the current draft (see [`SessionStore::set_input`]).
    pub async fn submit_pending(&self) -> Result<SubmitOutcome, ValidationError> {
        let draft = self.pending_input();
        self.submit(&draft).await
    }

    /// Replace the uncommitted draft.
    pub fn set_input(&self, text: impl Into<String>) {
        self.lock().pending_input = text.into();
    }

    pub fn pending_input(&self) -> String {
        self.lock().pending_input.clone()
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.lock().awaiting_response
    }

    pub fn messages(&self) -> Vec<Message> {
        self.lock().messages.clone()
    }

    pub fn message_count(&self) -> usize {
        self.lock().messages.len()
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.lock().connection.status()
    }

    /// Text appended when a turn fails.
    pub fn failure_reply(&self) -> &str {
        &self.failure_reply
    }

    /// Text appended when the backend answers with nothing.
    pub fn empty_reply(&self) -> &str {
        &self.empty_reply
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        SessionSnapshot {
            messages: state.messages.clone(),
            pending_input: state.pending_input.clone(),
            is_awaiting_response: state.awaiting_response,
            connection_status: state.connection.status(),
        }
    }

    /// Current probe epoch; a monitor captures it when it starts.
    pub fn connection_epoch(&self) -> u64 {
        self.lock().connection.epoch()
    }

    /// Reserve a place in the probe order. `None` once `epoch` is invalidated.
    pub fn issue_probe(&self, epoch: u64) -> Option<ProbeTicket> {
        self.lock().connection.issue(epoch)
    }

    /// Offer a probe result; it lands only if no later-issued probe already did.
    pub fn record_probe(&self, ticket: ProbeTicket, result: ProbeResult) -> ProbeApply {
        self.lock().connection.apply(ticket, result)
    }

    /// Discard outstanding probes. Nothing issued before this call can change the status.
    pub fn invalidate_probes(&self) {
        self.lock().connection.invalidate();
    }
}

/// Closes a turn. If the submitting future is dropped mid-turn, the failure
/// reply is appended so the user message still gets its answer.
struct TurnGuard<'a> {
    store: &'a SessionStore,
    finished: bool,
}

impl TurnGuard<'_> {
    fn finish(mut self, reply: String) -> Message {
        self.finished = true;
        self.close(reply)
    }

    fn close(&self, reply: String) -> Message {
        let mut state = self.store.lock();
        let message = state.push(Role::Bot, reply);
        state.awaiting_response = false;
        message
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("Chat turn abandoned before the reply arrived");
            self.close(self.store.failure_reply.clone());
        }
    }
}
