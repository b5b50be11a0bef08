//! chat-relay - chat session core and stateless proxy for a remote inference service
//!
//! The library has two halves:
//!
//! - the client side: [`session::SessionStore`] (message history and turn
//!   lifecycle), [`relay::HttpRelayClient`] (one chat turn per call) and
//!   [`health::HealthMonitor`] (connection polling);
//! - the server side: the axum routes in [`api`], which forward chat requests
//!   to the backend through [`upstream::BackendClient`] and answer with a
//!   fallback reply when it cannot.

pub mod api;
pub mod cli;
pub mod config;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod relay;
pub mod session;
pub mod upstream;
