//! onoffboard API server
//!
//! Receives identity-provider lifecycle events and keeps GitHub team
//! membership in line with them.

mod app;
mod config;
mod logging;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::app::{build_router, build_state};
use crate::config::AppConfig;

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    logging::init_logging(logging::DEFAULT_FILTER);

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let state = match build_state(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize lifecycle pipeline: {e}");
            std::process::exit(1);
        }
    };

    let listener = match TcpListener::bind(config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.listen_addr, "Failed to bind: {e}");
            std::process::exit(1);
        }
    };
    info!(addr = %config.listen_addr, "Starting onoffboard API server");

    if let Err(e) = axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
