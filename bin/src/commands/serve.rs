//! Serve command implementation.

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use crate::api;
use crate::config::AppConfig;

/// Runs the HTTP API until interrupted.
pub(crate) async fn serve(config: &AppConfig) -> Result<()> {
    let client = super::forecast_client(config)?;
    let app = api::router(client);

    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;
    tracing::info!(
        addr = %config.server.bind,
        egress = %config.egress.kind,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
