//! HTTP server answering "which tee times are bookable at a golf club on a
//! given date" by scraping MiClub-style public booking pages on demand.

mod config;
mod scrape;
mod server;
mod types;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::config::AppConfig;
use crate::types::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config file path is the sole argument; without one the server runs
    // with defaults and an empty site allow-list.
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_file(Path::new(&path))?,
        None => AppConfig::default(),
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.tracing_level())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = AppState::from_config(&config).context("Failed to initialize scraper state")?;
    let app = server::create_router(Arc::new(state));

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
