//! Request correlation IDs

use uuid::Uuid;

/// Generate a new request ID using UUID v4
///
/// Ties together every log line emitted for one relayed chat request.
///
/// # Examples
///
/// ```
/// use chat_relay::logging::generate_request_id;
///
/// let request_id = generate_request_id();
/// assert!(!request_id.is_empty());
/// ```
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
