//! Cutoff Server - serves college-admission cutoff data over HTTP
//!
//! Binary entry point: wires configuration, cache, sweep task and router.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cutoff_server::{create_router, spawn_sweep_task, AppState, Config};

/// Main entry point for the cutoff server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the shared state (cache, data source, limiter, domain filter)
/// 4. Start background cache sweep task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM, then stop the sweep task
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cutoff_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cutoff server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, data_file={}, cache_ttl={}s, sweep_interval={}s, rate_limit={}/{}s, allowed_hosts={:?}",
        config.server_port,
        config.data_file.display(),
        config.cache_ttl,
        config.sweep_interval,
        config.rate_limit_max_requests,
        config.rate_limit_window,
        config.allowed_hosts,
    );
    if !config.data_file.exists() {
        warn!(
            "Data file {} does not exist yet; /api/data will fail until it does",
            config.data_file.display()
        );
    }

    let state = AppState::from_config(&config);
    info!("Cache store initialized");

    let sweeper = spawn_sweep_task(state.cache.clone(), config.sweep_interval());
    info!("Background sweep task started");

    let app = create_router(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    // Peer addresses feed the rate limiter when no X-Forwarded-For is present
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    sweeper.shutdown().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
