use anyhow::{Context, Result};
use opsdesk::config;
use opsdesk::mock_server;
use opsdesk::MemoryBackend;
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = config::load_config().context("failed to load configuration")?;
    config::init_tracing(&cfg.log_level, cfg.log_json);

    let addr: SocketAddr = cfg
        .mock_server_addr()
        .parse()
        .with_context(|| format!("invalid bind address {}", cfg.mock_server_addr()))?;

    let app = mock_server::router(MemoryBackend::new());
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Starting in-memory resource server on http://{}/api", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
