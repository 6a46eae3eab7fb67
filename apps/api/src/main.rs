mod ats;
mod builder;
mod config;
mod db;
mod errors;
mod extractors;
mod github;
mod llm_client;
mod models;
mod routes;
mod state;
mod tracking;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ats::extract::PdfTextExtractor;
use crate::ats::pipeline::AtsPipeline;
use crate::config::Config;
use crate::db::create_pool;
use crate::github::GithubClient;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Internship API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Upload directory for transient resume files
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Cannot create upload dir {}", config.upload_dir.display()))?;
    info!("Resume uploads stored under {}", config.upload_dir.display());

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let github = GithubClient::new(config.github_api_url.clone(), config.github_token.clone())?;

    // ATS pipeline: PDF extraction + Gemini scoring
    let ats = Arc::new(AtsPipeline::new(
        Arc::new(PdfTextExtractor),
        Arc::new(llm.clone()),
        config.upload_dir.clone(),
    ));

    // Build app state
    let state = AppState {
        db,
        llm,
        github,
        config: config.clone(),
        ats,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
