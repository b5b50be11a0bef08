//! Degraded replies served when the backend cannot answer.

use crate::config::DEFAULT_FALLBACK_RESPONSES;
use rand::seq::SliceRandom;

/// Pick one of the configured fallback replies at random.
///
/// An empty list (rejected by config validation) falls back to the built-in set.
pub fn pick_fallback(responses: &[String]) -> &str {
    let mut rng = rand::thread_rng();
    match responses.choose(&mut rng) {
        Some(reply) => reply.as_str(),
        None => DEFAULT_FALLBACK_RESPONSES
            .choose(&mut rng)
            .copied()
            .unwrap_or(DEFAULT_FALLBACK_RESPONSES[0]),
    }
}
