//! Field helpers for structured logging

/// Longest content preview written to logs, in characters.
pub const CONTENT_PREVIEW_CHARS: usize = 100;

/// Preview of chat content for a log field (privacy-safe).
///
/// Returns `None` unless content logging is enabled; otherwise the first
/// [`CONTENT_PREVIEW_CHARS`] characters, with `...` appended when cut.
///
/// # Examples
///
/// ```
/// use chat_relay::logging::truncate_content;
///
/// assert_eq!(truncate_content("hello", false), None);
/// assert_eq!(truncate_content("hello", true).as_deref(), Some("hello"));
/// ```
pub fn truncate_content(content: &str, enable_content_logging: bool) -> Option<String> {
    if !enable_content_logging || content.is_empty() {
        return None;
    }
    Some(truncate_chars(content, CONTENT_PREVIEW_CHARS))
}

/// Truncate on a character boundary.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}...", &s[..cut]),
    }
}
