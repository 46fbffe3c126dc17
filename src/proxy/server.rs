//! Proxy server setup and initialization

use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

use crate::config::Config;

use super::handlers;
use super::state::ProxyState;

/// Start the proxy server
pub async fn start_proxy(
    config: Config,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> Result<()> {
    let bind_addr = config.bind_addr;

    // Build the HTTP client with timeout and connection pooling.
    // The timeout bounds the whole backend interaction, body included, so
    // it also caps how long a stalled stream can hold a connection.
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .pool_max_idle_per_host(10)
        // Force HTTP/1.1; local inference servers rarely speak HTTP/2
        .http1_only()
        .build()
        .context("Failed to create HTTP client")?;

    let state = ProxyState {
        client,
        backend_url: config.backend_url.clone(),
    };

    let app = build_router(state);

    tracing::info!("Starting proxy on {}", bind_addr);

    // Bind and serve
    let listener = TcpListener::bind(bind_addr)
        .await
        .context("Failed to bind to address")?;

    tracing::info!("Proxy listening on {}", bind_addr);

    // Start serving requests with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_rx.await.ok();
        })
        .await
        .context("Server error")?;

    tracing::info!("Proxy server shut down gracefully");
    Ok(())
}

/// Build the router with the proxy routes
pub(super) fn build_router(state: ProxyState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/v1/chat/completions", post(handlers::chat_completions))
        .with_state(state)
}
