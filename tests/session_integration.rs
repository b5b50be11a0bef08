//! End-to-end tests: session store → HTTP relay client → proxy → mock backend.

mod common;

use chat_relay::config::SessionConfig;
use chat_relay::relay::{ChatTransport, HttpRelayClient, RelayError};
use chat_relay::session::{Role, SessionStore, SubmitOutcome};
use common::{backend_replying, spawn_proxy, unreachable_url};
use std::sync::Arc;
use std::time::Duration;

fn session_for(proxy_url: &str) -> (SessionStore, SessionConfig) {
    let config = SessionConfig {
        proxy_url: proxy_url.to_string(),
        ..SessionConfig::default()
    };
    let client = HttpRelayClient::new(proxy_url, Duration::from_secs(10)).unwrap();
    let transport: Arc<dyn ChatTransport> = Arc::new(client);
    (SessionStore::new(transport, &config), config)
}

#[tokio::test]
async fn test_hi_with_backend_down_gets_one_degraded_reply() {
    let proxy = spawn_proxy(&unreachable_url()).await;
    let (session, config) = session_for(&proxy.url);

    let outcome = session.submit("hi").await.unwrap();

    let messages = session.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].content, "hi");
    assert_eq!(messages[2].role, Role::Bot);
    assert_eq!(messages[2].content, config.failure_reply);
    assert_eq!(outcome, SubmitOutcome::Replied(messages[2].clone()));
    assert!(!session.is_awaiting_response());
}

#[tokio::test]
async fn test_backend_reply_lands_verbatim() {
    let backend = backend_replying("hello").await;
    let proxy = spawn_proxy(&backend.uri()).await;
    let (session, _) = session_for(&proxy.url);

    session.submit("hi").await.unwrap();

    let last = session.messages().pop().unwrap();
    assert_eq!(last.role, Role::Bot);
    assert_eq!(last.content, "hello");
}

#[tokio::test]
async fn test_empty_backend_reply_becomes_placeholder() {
    let backend = backend_replying("").await;
    let proxy = spawn_proxy(&backend.uri()).await;
    let (session, config) = session_for(&proxy.url);

    session.submit("hi").await.unwrap();

    let last = session.messages().pop().unwrap();
    assert_eq!(last.content, config.empty_reply);
    assert!(!last.content.is_empty());
}

#[tokio::test]
async fn test_proxy_fallback_is_a_relay_error() {
    let proxy = spawn_proxy(&unreachable_url()).await;
    let client = HttpRelayClient::new(&proxy.url, Duration::from_secs(10)).unwrap();

    let err = client.send("hi").await.unwrap_err();
    assert_eq!(err, RelayError::BackendStatus(503));
}

#[tokio::test]
async fn test_conversation_alternates_over_several_turns() {
    let backend = backend_replying("ok").await;
    let proxy = spawn_proxy(&backend.uri()).await;
    let (session, _) = session_for(&proxy.url);

    for text in ["one", "   ", "two", "three"] {
        let _ = session.submit(text).await;
    }

    let roles: Vec<Role> = session.messages().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::Bot,
            Role::User,
            Role::Bot,
            Role::User,
            Role::Bot,
            Role::User,
            Role::Bot
        ]
    );
}
