use std::sync::Arc;

use clipshelf_server::config::AppConfig;
use clipshelf_server::mailer::LogMailer;
use clipshelf_server::{build_router, build_state};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("clipshelf_server=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config, Arc::new(LogMailer)).await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Clipshelf listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
