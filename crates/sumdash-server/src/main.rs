use std::sync::Arc;

use anyhow::{Context, Result};
use sumdash_config::AppConfig;
use sumdash_server::{init_tracing, router, ServerState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::load().context("failed to load configuration")?;
    let addr = config.bind_addr;
    let state = Arc::new(ServerState::init(config));

    let app = router(state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
