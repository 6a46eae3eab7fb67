//! ATS scoring pipeline: orchestrates one upload from receipt to response.
//!
//! Flow: Received → Extracting → Scoring → Parsing → Responding.
//! CleaningUp runs after every stage outcome, success or failure, before the
//! response leaves the handler. Failures short-circuit; nothing is retried.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::ats::extract::{ExtractionError, TextExtractor};
use crate::ats::intake::UploadedResume;
use crate::ats::parser::{
    parse_match_score, parse_score_response, MalformedAiResponse, MatchScore, ScoreResult,
};
use crate::ats::prompts::{build_ats_prompt, build_match_prompt};
use crate::ats::scoring::{ScoringClient, ScoringFault};

/// Lifecycle stages of one ATS request, used for logging transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Extracting,
    Scoring,
    Parsing,
    Responding,
    CleaningUp,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Extracting => "extracting",
            Stage::Scoring => "scoring",
            Stage::Parsing => "parsing",
            Stage::Responding => "responding",
            Stage::CleaningUp => "cleaning_up",
        };
        f.write_str(name)
    }
}

/// Every way an ATS request can fail.
#[derive(Debug, Error)]
pub enum AtsError {
    #[error("no resume file uploaded")]
    NoFileUploaded,

    #[error("more than one resume file uploaded")]
    TooManyFiles,

    #[error("no job description provided")]
    MissingJobDescription,

    #[error("invalid multipart upload: {0}")]
    InvalidUpload(#[from] MultipartError),

    #[error("could not store upload: {0}")]
    Storage(#[from] std::io::Error),

    #[error("text extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Scoring(#[from] ScoringFault),

    #[error(transparent)]
    MalformedAiResponse(#[from] MalformedAiResponse),
}

/// The externally visible shape of a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub status: StatusCode,
    pub error: &'static str,
    pub reason: String,
}

impl AtsError {
    pub fn classify(&self) -> ClassifiedError {
        let (status, error, reason) = match self {
            AtsError::NoFileUploaded => (
                StatusCode::BAD_REQUEST,
                "No resume file uploaded.",
                "Please upload a PDF file.".to_string(),
            ),
            AtsError::TooManyFiles => (
                StatusCode::BAD_REQUEST,
                "Too many files uploaded.",
                "Upload exactly one file in the 'resume' field.".to_string(),
            ),
            AtsError::MissingJobDescription => (
                StatusCode::BAD_REQUEST,
                "No job description provided.",
                "Include the job description in the 'jobDescription' field.".to_string(),
            ),
            AtsError::InvalidUpload(e) => (e.status(), "Invalid upload.", e.body_text()),
            AtsError::Storage(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Resume processing failed",
                e.to_string(),
            ),
            AtsError::Extraction(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Resume processing failed",
                e.to_string(),
            ),
            AtsError::Scoring(ScoringFault::QuotaExceeded(_)) => (
                StatusCode::TOO_MANY_REQUESTS,
                "AI assistant is currently unavailable due to quota limits.",
                "AI quota exceeded. Please try again later.".to_string(),
            ),
            AtsError::Scoring(ScoringFault::Service(msg)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI assistant encountered an API error.",
                msg.clone(),
            ),
            AtsError::Scoring(ScoringFault::Transport(msg) | ScoringFault::Unknown(msg)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get ATS score from AI assistant.",
                msg.clone(),
            ),
            AtsError::MalformedAiResponse(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid AI response format.",
                "AI response was not in expected JSON format. Please try again.".to_string(),
            ),
        };
        ClassifiedError {
            status,
            error,
            reason,
        }
    }
}

impl IntoResponse for AtsError {
    fn into_response(self) -> Response {
        let classified = self.classify();
        if classified.status.is_server_error() {
            error!("ATS request failed: {self}");
        } else {
            warn!("ATS request rejected: {self}");
        }

        let body = Json(json!({
            "error": classified.error,
            "reason": classified.reason
        }));

        (classified.status, body).into_response()
    }
}

/// Upload → extract → prompt → score → parse, with guaranteed upload cleanup.
pub struct AtsPipeline {
    extractor: Arc<dyn TextExtractor>,
    scorer: Arc<dyn ScoringClient>,
    upload_dir: PathBuf,
}

impl AtsPipeline {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        scorer: Arc<dyn ScoringClient>,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            extractor,
            scorer,
            upload_dir,
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Scores one uploaded resume. The upload is deleted before this returns,
    /// whatever the outcome.
    pub async fn run(&self, upload: UploadedResume) -> Result<ScoreResult, AtsError> {
        log_received(&upload);
        let outcome = self.score(upload.path()).await;
        finish(upload, outcome, |result| result.score)
    }

    /// Rates the uploaded resume against a job description. Same cleanup
    /// guarantee as [`AtsPipeline::run`].
    pub async fn run_match(
        &self,
        upload: UploadedResume,
        job_description: &str,
    ) -> Result<MatchScore, AtsError> {
        log_received(&upload);
        let outcome = self.match_job(upload.path(), job_description).await;
        finish(upload, outcome, |result| result.score)
    }

    async fn score(&self, path: &Path) -> Result<ScoreResult, AtsError> {
        debug!("ATS {}", Stage::Extracting);
        let resume_text = self.extractor.extract(path).await?;

        let prompt = build_ats_prompt(&resume_text);
        debug!(
            "ATS {}: resume_chars={}, prompt_chars={}",
            Stage::Scoring,
            resume_text.chars().count(),
            prompt.chars().count()
        );
        let raw = self.scorer.generate(&prompt).await?;

        debug!("ATS {}: raw_len={}", Stage::Parsing, raw.len());
        Ok(parse_score_response(&raw)?)
    }

    async fn match_job(&self, path: &Path, job_description: &str) -> Result<MatchScore, AtsError> {
        debug!("ATS {}", Stage::Extracting);
        let resume_text = self.extractor.extract(path).await?;

        let prompt = build_match_prompt(&resume_text, job_description);
        debug!("ATS {}: job match, prompt_chars={}", Stage::Scoring, prompt.chars().count());
        let raw = self.scorer.generate(&prompt).await?;

        debug!("ATS {}: raw_len={}", Stage::Parsing, raw.len());
        Ok(parse_match_score(&raw))
    }
}

fn log_received(upload: &UploadedResume) {
    info!(
        "ATS {}: {:?} at {}",
        Stage::Received,
        upload.original_name().unwrap_or("<unnamed>"),
        upload.path().display()
    );
}

/// Deletes the upload, then logs and hands back the outcome.
fn finish<T>(
    upload: UploadedResume,
    outcome: Result<T, AtsError>,
    score: impl Fn(&T) -> u32,
) -> Result<T, AtsError> {
    debug!("ATS {}", Stage::CleaningUp);
    upload.cleanup();

    match &outcome {
        Ok(result) => info!("ATS {}: score={}", Stage::Responding, score(result)),
        Err(e) => warn!("ATS {}: {e}", Stage::Responding),
    }
    outcome
}
