//! Output formatting helpers for CLI commands

use crate::api::types::BackendState;
use crate::health::ConnectionStatus;
use crate::session::{Message, Role};
use colored::Colorize;
use serde::Serialize;

/// Render one chat message as a single terminal line.
pub fn format_message(message: &Message) -> String {
    let label = match message.role {
        Role::User => "you".cyan().bold(),
        Role::Bot => "bot".green().bold(),
    };
    format!("{} {} {}", message.timestamp.format("%H:%M"), label, message.content)
}

/// Colored connection indicator, used in the chat prompt.
pub fn format_connection(status: ConnectionStatus) -> String {
    match status {
        ConnectionStatus::Checking => "checking".yellow().to_string(),
        ConnectionStatus::Connected => "connected".green().to_string(),
        ConnectionStatus::Disconnected => "disconnected".red().to_string(),
    }
}

/// View model for `chat-relay status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub proxy_url: String,
    /// `None` when the proxy itself could not be reached or answered garbage
    pub backend: Option<BackendState>,
    pub message: String,
}

impl StatusView {
    pub fn is_connected(&self) -> bool {
        self.backend == Some(BackendState::Connected)
    }
}

/// Format a status check for humans.
pub fn format_status_text(view: &StatusView) -> String {
    let state = match view.backend {
        Some(BackendState::Connected) => "connected".green().bold(),
        Some(BackendState::Disconnected) => "disconnected".red().bold(),
        Some(BackendState::Error) => "error".red().bold(),
        None => "proxy unreachable".red().bold(),
    };
    format!(
        "Proxy:   {}\nBackend: {}\n         {}",
        view.proxy_url, state, view.message
    )
}

/// Format a status check as JSON.
pub fn format_status_json(view: &StatusView) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(view)
}
