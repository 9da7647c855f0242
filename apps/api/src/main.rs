mod config;
mod errors;
mod interview;
mod llm_client;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::gateway::ActionGateway;
use crate::interview::summarize::build_summarizer;
use crate::llm_client::{AiClient, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting MockPrep API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_timeout)?;
    let client = AiClient::new(Arc::new(llm), config.llm_timeout);
    info!(
        "LLM client initialized (model: {}, backend: {}, timeout: {:?})",
        llm_client::MODEL,
        client.backend_name(),
        config.llm_timeout
    );

    // Summarizer: truncating by default, swap via SUMMARIZER=model
    let summarizer = build_summarizer(config.summarizer, client.clone());
    info!("Summarizer: {}", summarizer.name());

    let gateway = ActionGateway::new(client, summarizer)
        .with_backend_errors_exposed(config.expose_backend_errors);
    let state = AppState::new(gateway);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
