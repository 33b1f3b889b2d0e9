//! YaMDb Server: review and rating service for films, books and music.
//!
//! Main entry point that wires all crates together and starts the server.

use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use yamdb_api::AppState;
use yamdb_core::config::AppConfig;
use yamdb_core::error::AppError;
use yamdb_database::Repositories;

#[tokio::main]
async fn main() {
    let env = std::env::var("YAMDB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging. `RUST_LOG` overrides the configured level.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting YaMDb v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Store + migrations ───────────────────────────────
    tracing::info!(provider = %config.database.provider, "Connecting to store...");
    let repos = Repositories::connect(&config.database).await?;

    // ── Step 2: Mail transport ───────────────────────────────────
    let notifier = yamdb_service::build_notifier(&config.mail)?;
    tracing::info!(transport = %config.mail.transport, "Mail transport ready");

    // ── Step 3: HTTP server ──────────────────────────────────────
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::build(config, repos.clone(), notifier)?;

    yamdb_api::app::run_server(state, shutdown_signal()).await?;

    tracing::info!(grace_seconds = grace.as_secs(), "Draining store connections");
    if tokio::time::timeout(grace, repos.close()).await.is_err() {
        tracing::warn!("Store did not close within the grace period");
    }

    tracing::info!("YaMDb server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
