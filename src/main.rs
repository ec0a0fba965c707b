use anyhow::Result;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chat_translate_backend::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("chat_translate_backend=debug,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::discover()?;
    if config.translator_config.api_key.is_empty() {
        tracing::warn!("No translator subscription key configured");
    }
    if config.text_correction_config.api_key.is_empty() {
        tracing::warn!("No text correction API key configured");
    }

    let shutdown = CancellationToken::new();
    let app_state = AppState::new(config.clone(), shutdown.clone())?;
    let app = create_app(app_state);

    let host: std::net::IpAddr = config.system_config.host.parse()?;
    let addr = SocketAddr::from((host, config.system_config.port));
    info!("Starting server on {}", addr);

    let ctrl_c_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested");
            ctrl_c_token.cancel();
        }
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("Server stopped");
    Ok(())
}
