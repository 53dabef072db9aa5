//! `jargon-server` entry point.

use anyhow::{Context, Result};
use clap::Parser;
use jargon_core::db::open_db;
use jargon_core::init_logging;
use jargon_server::{app, AppState, ServerConfig};
use log::{info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    init_logging(config.log_level(), config.log_dir.as_deref()).map_err(anyhow::Error::msg)?;

    let base_path = config.base_path()?;
    let addr = config.bind_addr()?;

    let conn = open_db(&config.db_path).with_context(|| {
        format!(
            "failed to open term store at `{}`",
            config.db_path.display()
        )
    })?;
    let router = app(AppState::new(conn), &base_path);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!(
        "event=http_listen module=server status=ok addr={addr} base_path={}",
        if base_path.is_empty() { "/" } else { &base_path }
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("event=http_shutdown module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=http_shutdown module=server status=error error={err}");
        std::future::pending::<()>().await;
    }
}
