//! Serve command - runs the HTTP API

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::api::{create_router, AppState};
use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;

/// Run the API server until Ctrl+C or SIGTERM, then tear down the clients
pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let addr = build_socket_addr(&config)?;
    let state = AppState::from_config(config);
    let registry = state.registry.clone();
    let app = create_router(state);

    info!("Starting medical research RAG server on {}", addr);
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    registry.teardown().await;
    info!("Server shutdown complete");

    Ok(())
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    Ok(addr.parse()?)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr_from_config() {
        let addr = build_socket_addr(&AppConfig::default()).unwrap();
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn test_invalid_host_is_error() {
        let mut config = AppConfig::default();
        config.server.host = "not a host".to_string();
        assert!(build_socket_addr(&config).is_err());
    }
}
