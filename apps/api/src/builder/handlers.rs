//! Axum route handler for the resume builder.

use anyhow::Context;
use axum::{extract::State, response::Html};
use tracing::info;

use crate::ats::scoring::ScoringFault;
use crate::builder::prompts::SUMMARY_SYSTEM;
use crate::builder::render::render_resume_html;
use crate::builder::{build_summary_prompt, summary_lines, GenerateResumeRequest};
use crate::errors::AppError;
use crate::extractors::ApiJson;
use crate::llm_client::LlmError;
use crate::state::AppState;

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match ScoringFault::from(err) {
            ScoringFault::QuotaExceeded(msg) => AppError::QuotaExceeded(msg),
            other => AppError::Llm(other.to_string()),
        }
    }
}

/// POST /api/generate-resume
///
/// Writes a three-line summary with the LLM and returns the rendered HTML resume.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateResumeRequest>,
) -> Result<Html<String>, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }

    let prompt = build_summary_prompt(&request);
    let text = state.llm.call_text(&prompt, SUMMARY_SYSTEM).await?;
    let summary = summary_lines(&text);
    info!("Generated {}-line summary for resume of {}", summary.len(), request.name);

    let html = render_resume_html(&request, &summary).context("Failed to render resume HTML")?;
    Ok(Html(html))
}
