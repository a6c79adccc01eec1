//! skycast gateway binary.
//!
//! # Environment Variables
//!
//! - `WEATHER_API_KEY`: WeatherAPI.com key (required)
//! - `WEATHER_API_BASE_URL`: upstream base URL
//! - `HOST` / `PORT`: bind address (default: 0.0.0.0:8080)
//! - `RUST_LOG`: log filter (default: info)

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use skycast_gateway::{AppState, GatewayConfig, Upstream, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = GatewayConfig::from_env()?;
    info!(upstream = %config.upstream_base_url, "starting skycast gateway");

    let state = AppState::new(Upstream::new(&config.upstream_base_url, &config.api_key));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    info!("listening on http://{}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Gateway server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
