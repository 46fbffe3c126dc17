// lmrelay - Chat completion relay for OpenAI-compatible backends
//
// This tool sits between OpenAI-compatible clients and a local inference
// server (LM Studio, vLLM, llama.cpp, ...), forwarding /v1/chat/completions
// so clients on other machines can reach a backend that only listens on
// localhost.
//
// Architecture:
// - Relay server (axum): Accepts chat completion requests
// - Forwarder (reqwest): Replays the raw request bytes against the backend
// - Streaming relay: Passes SSE chunks through without buffering
// - Buffered collector: Validates non-streaming responses are JSON

mod cli;
mod config;
mod proxy;
mod startup;

use anyhow::Result;
use config::{Config, LogRotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --edit, --update)
    // If a command was handled, exit early
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Load configuration
    let config = Config::from_env();

    // Initialize tracing/logging with console output, optionally also
    // writing to rotating log files
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!(
        "lmrelay={},tower_http=debug,axum=debug",
        config.logging.level
    );

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // Set up file logging if enabled (non-blocking writer with rotation)
    // The guard must be kept alive for the duration of the program to ensure logs flush
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            // Create log directory if it doesn't exist
            if let Err(e) = std::fs::create_dir_all(&config.logging.file_dir) {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                // Fall back to console-only logging
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer())
                    .init();
                None
            } else {
                // Create rolling file appender based on configured rotation
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };

                // Wrap in non-blocking writer (writes happen in background thread)
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                // File layer uses JSON format for structured log parsing
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer())
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(non_blocking)
                            .with_ansi(false),
                    )
                    .init();

                Some(guard)
            }
        } else {
            // No file logging - console only
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();

            None
        };

    // Print startup banner before the server binds
    startup::print_startup(&config);
    startup::log_startup(&config);

    // Create shutdown channel for graceful server shutdown
    // This is a oneshot channel - it can only send one signal
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    // Spawn the relay server task
    let mut proxy_handle = tokio::spawn(proxy::start_proxy(config, shutdown_rx));

    // Wait for Ctrl+C, or for the server to exit on its own (bind failure etc.)
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down...");

            // Signal the proxy to shut down gracefully
            // If the send fails, the proxy has already shut down (which is fine)
            let _ = shutdown_tx.send(());

            proxy_handle.await??;
        }
        result = &mut proxy_handle => {
            result??;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
