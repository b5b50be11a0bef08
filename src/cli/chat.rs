//! Interactive terminal chat.
//!
//! Reads one message per line from stdin and drives a [`SessionStore`] against
//! a running proxy. `/status` shows the connection state, `/quit` or EOF exits,
//! and Ctrl-C abandons the turn in flight.

use crate::cli::output::{format_connection, format_message};
use crate::cli::{load_client_config, ChatArgs};
use crate::health::{HealthMonitor, MonitorHandle};
use crate::logging::init_tracing;
use crate::relay::{ChatTransport, HttpRelayClient};
use crate::session::{SessionStore, SubmitOutcome, ValidationError};
use colored::Colorize;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

/// What a line of input asks for.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Status,
    Message(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    match line.trim() {
        "/quit" | "/exit" => Input::Quit,
        "/status" => Input::Status,
        _ => Input::Message(line),
    }
}

fn prompt(session: &SessionStore) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(
        stdout,
        "[{}] {} ",
        format_connection(session.connection_status()),
        ">".bold()
    )?;
    stdout.flush()
}

/// Submit the draft, abandoning the turn on Ctrl-C.
async fn run_turn(session: &SessionStore) {
    let outcome = tokio::select! {
        outcome = session.submit_pending() => outcome,
        _ = tokio::signal::ctrl_c() => {
            println!();
            // The abandoned turn has already been closed with the failure reply
            if let Some(last) = session.messages().last() {
                println!("{}", format_message(last));
            }
            return;
        }
    };

    match outcome {
        Ok(SubmitOutcome::Replied(reply)) => println!("{}", format_message(&reply)),
        Ok(SubmitOutcome::Busy) => println!("{}", "Still waiting for the last reply.".yellow()),
        Err(ValidationError::EmptyMessage) => {}
    }
}

/// Handle `chat-relay chat`
pub async fn run_chat(args: ChatArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_client_config(&args.config, args.proxy_url.as_deref())?;
    if args.no_health_check {
        config.health_check.enabled = false;
    }

    // The terminal is the chat surface; only warnings go to stderr
    let mut logging = config.logging.clone();
    logging.level = "warn".to_string();
    init_tracing(&logging)?;

    let client = HttpRelayClient::new(
        &config.session.proxy_url,
        Duration::from_secs(config.session.request_timeout_seconds),
    )?;
    let transport: Arc<dyn ChatTransport> = Arc::new(client);
    let session = Arc::new(SessionStore::new(Arc::clone(&transport), &config.session));

    let cancel_token = CancellationToken::new();
    let monitor: Option<MonitorHandle> = if config.health_check.enabled {
        let monitor = HealthMonitor::new(
            Arc::clone(&session),
            Arc::clone(&transport),
            config.health_check.clone(),
        );
        Some(monitor.start(cancel_token.clone()))
    } else {
        None
    };

    println!(
        "{} {}",
        "Connected to relay at".dimmed(),
        config.session.proxy_url
    );
    for message in session.messages() {
        println!("{}", format_message(&message));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&session)?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        match parse_input(&line) {
            Input::Quit => break,
            Input::Status => {
                println!("{}", format_connection(session.connection_status()));
            }
            Input::Message(text) => {
                session.set_input(text);
                run_turn(&session).await;
            }
        }
    }

    if let Some(handle) = monitor {
        handle.shutdown().await?;
    }
    println!("{}", "Bye.".dimmed());
    Ok(())
}
