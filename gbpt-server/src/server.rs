//! Server startup.

use std::net::SocketAddr;

use axum::Router;
use tracing::{info, warn};

use crate::config::{AppConfig, ConfigError};
use crate::mbta::{MbtaClient, MbtaError};
use crate::web::{API_PREFIX, AppState, create_router};

/// Errors that stop the server from starting or serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to create MBTA client: {0}")]
    Client(#[from] MbtaError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Build the application router from configuration.
pub fn build_app(config: &AppConfig) -> Result<Router, StartupError> {
    if config.mbta.api_key.is_none() {
        warn!("MBTA_API_KEY not set; requests are subject to the anonymous rate limit");
    }

    let client = MbtaClient::new(config.mbta.clone())?;
    Ok(create_router(AppState::new(client)))
}

/// Bind and serve until interrupted.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    let app = build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.bind_addr,
            source,
        })?;

    info!(addr = %config.bind_addr, upstream = %config.mbta.base_url, "listening");
    info!("GET  /health");
    info!("GET  {API_PREFIX}/lines?type=heavy_rail");
    info!("GET  {API_PREFIX}/stops?line=<route id>");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
