//! # Test API Server
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ServerConfig::load() ── defaults, testapi.toml, TESTAPI_* env          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  init_tracing ──► Store::new (seed) ──► AppState ──► create_router      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  axum::serve on host:port until Ctrl+C / SIGTERM                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use testapi_server::{create_router, init_tracing, AppState, ServerConfig};
use testapi_store::Store;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.log_filter);

    info!(
        host = %config.host,
        port = config.port,
        products = config.product_seed_count,
        users = config.user_seed_count,
        "Configuration loaded"
    );

    let addr = config.socket_addr()?;
    let store = Store::new(config.store_config());
    let app = create_router(AppState::new(store, config));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "Test API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(?err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(?err, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
