use std::net::SocketAddr;

use anyhow::Context;
use devreg_core::validation::catalog::RuleCatalog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devreg_api::config::ServerConfig;
use devreg_api::router::build_app_router;
use devreg_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devreg_api=debug,devreg_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Validation rules ---
    // A missing or broken catalog is fatal: the server never runs without rules.
    let catalog = RuleCatalog::load(&config.validation.rules_path).with_context(|| {
        format!(
            "Failed to load validation rules from {}",
            config.validation.rules_path.display()
        )
    })?;
    tracing::info!(
        rule_groups = catalog.len(),
        protected_prefix = %config.validation.protected_prefix,
        "Validation rules loaded"
    );

    let host = config.host.clone();
    let port = config.port;

    // --- Router ---
    let app = build_app_router(AppState::new(config, catalog));

    // --- Start server ---
    let addr = SocketAddr::new(
        host.parse()
            .with_context(|| format!("Invalid HOST address '{host}'"))?,
        port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
