use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, Level};

use codeval_core::telemetry::json_requested_by_env;
use codeval_core::{init_tracing, load_env_files, AppConfig};
use codevald::{build_router, AppState};
use completion_gateway::GeminiClient;

#[tokio::main]
async fn main() -> Result<()> {
    if let Ok(cwd) = std::env::current_dir() {
        load_env_files(&cwd);
    }
    init_tracing(json_requested_by_env(), Level::INFO);

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let client =
        GeminiClient::new(config.gemini_config()).context("Failed to build the completion client")?;
    let state = AppState::new(Arc::new(client), config.evaluation_settings());
    let app = build_router(state);

    info!(addr = %config.bind_addr, model = %config.model, "listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
