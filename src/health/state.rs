//! Connection status tracking with issuance-ordered probe results.

use crate::api::types::BackendState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Connection status shown alongside the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// No probe has completed yet
    Checking,
    Connected,
    Disconnected,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Checking => f.write_str("checking"),
            ConnectionStatus::Connected => f.write_str("connected"),
            ConnectionStatus::Disconnected => f.write_str("disconnected"),
        }
    }
}

/// Outcome of one probe, as seen by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    Connected,
    Disconnected,
}

impl From<BackendState> for ProbeResult {
    fn from(state: BackendState) -> Self {
        match state {
            BackendState::Connected => ProbeResult::Connected,
            BackendState::Disconnected | BackendState::Error => ProbeResult::Disconnected,
        }
    }
}

impl From<ProbeResult> for ConnectionStatus {
    fn from(result: ProbeResult) -> Self {
        match result {
            ProbeResult::Connected => ConnectionStatus::Connected,
            ProbeResult::Disconnected => ConnectionStatus::Disconnected,
        }
    }
}

/// Handed out when a probe is issued; its result is only applied through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTicket {
    epoch: u64,
    seq: u64,
}

impl ProbeTicket {
    /// Issuance sequence number (1-based, per session).
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What happened when a probe result was offered to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeApply {
    /// A later-issued probe already landed, or the issuing monitor was stopped
    Stale,
    /// Applied, status did not change
    Unchanged(ConnectionStatus),
    /// Applied, status changed
    Changed {
        from: ConnectionStatus,
        to: ConnectionStatus,
    },
}

/// Connection status plus the bookkeeping that keeps it last-issued-wins.
#[derive(Debug, Clone)]
pub struct ConnectionState {
    status: ConnectionStatus,
    /// Bumped by `invalidate`; tickets from older epochs are discarded
    epoch: u64,
    /// Highest sequence number handed out
    issued: u64,
    /// Sequence number of the last applied result
    applied: u64,
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self {
            status: ConnectionStatus::Checking,
            epoch: 0,
            issued: 0,
            applied: 0,
        }
    }
}

impl ConnectionState {
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Issue a ticket for a probe belonging to `epoch`.
    ///
    /// Returns `None` once that epoch has been invalidated.
    pub fn issue(&mut self, epoch: u64) -> Option<ProbeTicket> {
        if epoch != self.epoch {
            return None;
        }
        self.issued += 1;
        Some(ProbeTicket {
            epoch,
            seq: self.issued,
        })
    }

    /// Apply a probe result if its ticket is still the newest one issued in this epoch.
    pub fn apply(&mut self, ticket: ProbeTicket, result: ProbeResult) -> ProbeApply {
        if ticket.epoch != self.epoch || ticket.seq <= self.applied {
            return ProbeApply::Stale;
        }
        self.applied = ticket.seq;

        let next = ConnectionStatus::from(result);
        if next == self.status {
            return ProbeApply::Unchanged(next);
        }
        let from = self.status;
        self.status = next;
        ProbeApply::Changed { from, to: next }
    }

    /// Discard every outstanding ticket and refuse new ones for the current epoch.
    pub fn invalidate(&mut self) {
        self.epoch += 1;
    }
}
