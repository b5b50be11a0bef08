//! Serve command implementation

use crate::api::{create_router, AppState};
use crate::api::types::BackendState;
use crate::cli::ServeArgs;
use crate::config::RelayConfig;
use crate::logging::init_tracing;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<RelayConfig, Box<dyn std::error::Error>> {
    let mut config = RelayConfig::load_or_default(&args.config)?;

    config = config.with_env_overrides();

    // CLI flags have the highest priority
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if args.no_health_check {
        config.health_check.enabled = false;
    }

    Ok(config)
}

/// Build API router with all endpoints
pub fn build_api_router(
    config: Arc<RelayConfig>,
) -> Result<(axum::Router, Arc<AppState>), Box<dyn std::error::Error>> {
    let app_state = Arc::new(AppState::new(config)?);
    let router = create_router(Arc::clone(&app_state));
    Ok((router, app_state))
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
        _ = cancel_token.cancelled() => {}
    }

    cancel_token.cancel();
}

/// Probe the backend once and log the answer. Never fails startup.
async fn log_backend_status(state: &AppState) {
    let url = &state.config.backend.url;
    match state.backend.probe().await {
        BackendState::Connected => {
            tracing::info!(backend = %url, "Inference backend is reachable");
        }
        other => {
            tracing::warn!(
                backend = %url,
                status = %other,
                "Inference backend is not reachable yet; chat requests will get fallback replies"
            );
        }
    }
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    init_tracing(&config.logging)?;

    tracing::info!("Starting chat relay");
    tracing::debug!(?config, "Loaded configuration");

    let config_arc = Arc::new(config.clone());
    let (app, app_state) = build_api_router(config_arc)?;

    if config.health_check.enabled {
        log_backend_status(&app_state).await;
    } else {
        tracing::info!("Startup backend probe disabled");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %addr,
        backend = %config.backend.url,
        "Chat relay listening"
    );

    let cancel_token = CancellationToken::new();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    tracing::info!("Chat relay stopped");
    Ok(())
}
