use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::ats::pipeline::AtsPipeline;
use crate::config::Config;
use crate::github::GithubClient;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub github: GithubClient,
    pub config: Config,
    /// ATS scoring pipeline with its injected extractor and scoring client.
    pub ats: Arc<AtsPipeline>,
}

impl FromRef<AppState> for Arc<AtsPipeline> {
    fn from_ref(state: &AppState) -> Self {
        state.ats.clone()
    }
}
