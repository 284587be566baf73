//! Gold Catalog - A product catalog API with live gold pricing
//!
//! Serves products from a Strapi CMS (falling back to a built-in catalog),
//! prices each one from a cached gold spot price, and exposes filtered,
//! paginated listings over HTTP.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gold_catalog::api::create_router_with_assets;
use gold_catalog::{spawn_price_refresh_task, warm_up, AppState, Config};

/// Main entry point for the catalog server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Wire the CMS feed, gold price cache and fallback catalog
/// 4. Warm the gold price cache and check the CMS
/// 5. Start background price refresh task
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gold_catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Gold Catalog Server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, strapi={}, gold_api={}, cache_valid={}m, timeout={}s",
        config.server_port,
        config.strapi_url,
        config.gold_api_url,
        config.cache_valid_minutes,
        config.http_timeout
    );

    let state = AppState::from_config(&config).context("failed to build application state")?;

    warm_up(&state.prices, &state.catalog).await;

    let refresh_handle = spawn_price_refresh_task(state.prices.clone(), config.refresh_interval);

    let app = create_router_with_assets(state, &config.static_dir);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server is running on http://{}", addr);
    info!("Strapi CMS expected at {}/admin", config.strapi_url);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(refresh_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the refresh task and allows graceful shutdown.
async fn shutdown_signal(refresh_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
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

    if let Some(handle) = refresh_handle {
        handle.abort();
        warn!("Price refresh task aborted");
    }
}
