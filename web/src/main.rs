//! Seating Server
//!
//! Hosts one venue's reservation ledger over HTTP.
//!
//! # Usage
//!
//! ```bash
//! TOTAL_SEATS=50 PORT=8080 cargo run --bin seating-server
//! ```

use anyhow::Context;
use seating_core::ReservationLedger;
use seating_web::{AppState, Config, build_router};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.server.log_level)
                .unwrap_or_else(|_| seating_web::config::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        venue = %config.venue.name,
        total_seats = config.venue.total_seats,
        address = %config.bind_address(),
        "Configuration loaded"
    );

    let ledger = ReservationLedger::new(config.venue.total_seats)
        .context("TOTAL_SEATS must be a positive integer")?;
    let app = build_router(AppState::new(ledger, config.venue.name.as_str()));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(());
    });

    let grace = config.shutdown_timeout();
    let deadline = async move {
        let _ = shutdown_rx.await;
        tokio::time::sleep(grace).await;
    };

    info!("Seating server listening for requests");
    tokio::select! {
        result = server.into_future() => result.context("HTTP server error")?,
        () = deadline => {
            warn!(timeout_secs = grace.as_secs(), "Shutdown timeout elapsed, dropping open connections");
        }
    }

    info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        () = terminate => {
            info!("Received SIGTERM signal");
        }
    }
}
