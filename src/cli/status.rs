//! Status command implementation

use crate::cli::output::{format_status_json, format_status_text, StatusView};
use crate::cli::{load_client_config, StatusArgs};
use crate::relay::{ChatTransport, HttpRelayClient};
use std::time::Duration;

/// Ask the proxy once whether the backend is reachable.
pub async fn check_status<T: ChatTransport + ?Sized>(transport: &T, proxy_url: &str) -> StatusView {
    match transport.check_status().await {
        Ok(response) => StatusView {
            proxy_url: proxy_url.to_string(),
            backend: Some(response.status),
            message: response.message,
        },
        Err(e) => StatusView {
            proxy_url: proxy_url.to_string(),
            backend: None,
            message: e.to_string(),
        },
    }
}

/// Handle `chat-relay status`. Fails unless the backend reports connected.
pub async fn run_status(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_client_config(&args.config, args.proxy_url.as_deref())?;
    let client = HttpRelayClient::new(
        &config.session.proxy_url,
        Duration::from_secs(config.health_check.timeout_seconds),
    )?;

    let view = check_status(&client, client.base_url()).await;

    if args.json {
        println!("{}", format_status_json(&view)?);
    } else {
        println!("{}", format_status_text(&view));
    }

    if view.is_connected() {
        Ok(())
    } else {
        Err(format!("backend not connected via {}", view.proxy_url).into())
    }
}
