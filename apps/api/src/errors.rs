use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type for the tracking, import and builder routes.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The ATS pipeline has its own taxonomy (`ats::AtsError`) but renders the
/// same `{error, reason}` body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, reason) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "Validation error", msg.clone()),
            AppError::QuotaExceeded(msg) => {
                tracing::warn!("LLM quota exceeded: {msg}");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "AI assistant is currently unavailable due to quota limits.",
                    "AI quota exceeded. Please try again later.".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI assistant encountered an API error.",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                (StatusCode::BAD_GATEWAY, "Upstream error", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error,
            "reason": reason
        }));

        (status, body).into_response()
    }
}
