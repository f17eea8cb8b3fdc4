//! # Moon Times Server Entry Point
//!
//! Loads configuration, installs the tracing subscriber and serves the HTTP API.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0, or `[server] host` in moon-config.toml)
//! - `PORT`: Server port (default: 3000, or `[server] port` in moon-config.toml)
//! - `RUST_LOG`: Log filter (default: info)

// Test modules
#[cfg(test)]
mod tests;

use moon_times_lib::config::Config;
use moon_times_lib::http::{create_router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = Config::load();
    let addr = config.bind_addr()?;

    let app = create_router(AppState::default());

    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
