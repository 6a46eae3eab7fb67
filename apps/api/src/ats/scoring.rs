//! Scoring client: sends the ATS prompt to the generative-text service.
//!
//! Fault classification happens once, here, at the adapter boundary.
//! Everything downstream matches on `ScoringFault` and never inspects strings.

use async_trait::async_trait;
use thiserror::Error;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};

/// Service status identifiers that mean the service itself rejected or failed the call.
const SERVICE_STATUS_CODES: &[&str] = &[
    "INTERNAL",
    "UNAVAILABLE",
    "DEADLINE_EXCEEDED",
    "INVALID_ARGUMENT",
    "FAILED_PRECONDITION",
    "PERMISSION_DENIED",
    "UNAUTHENTICATED",
    "NOT_FOUND",
];

const QUOTA_STATUS_CODE: &str = "RESOURCE_EXHAUSTED";

/// A classified failure of the external scoring call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringFault {
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("service error: {0}")]
    Service(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unknown scoring error: {0}")]
    Unknown(String),
}

impl ScoringFault {
    /// Classifies a failure from its status code, service identifier and message.
    pub fn classify(status: Option<u16>, code: Option<&str>, message: &str) -> Self {
        let message = message.to_string();
        if status == Some(429) || code == Some(QUOTA_STATUS_CODE) || mentions_quota(&message) {
            return ScoringFault::QuotaExceeded(message);
        }
        let known_service_code = code.is_some_and(|c| SERVICE_STATUS_CODES.contains(&c));
        let server_status = status.is_some_and(|s| (500..600).contains(&s));
        if known_service_code || server_status {
            return ScoringFault::Service(message);
        }
        ScoringFault::Unknown(message)
    }
}

/// Matches the quota wording some SDKs and proxies put in plain-text errors.
fn mentions_quota(message: &str) -> bool {
    message.contains("429 Too Many Requests") && message.to_lowercase().contains("quota")
}

impl From<LlmError> for ScoringFault {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Api {
                status,
                code,
                message,
            } => ScoringFault::classify(Some(status), code.as_deref(), &message),
            LlmError::Http(e) if e.is_timeout() || e.is_connect() || e.is_request() => {
                ScoringFault::Transport(e.to_string())
            }
            LlmError::Http(e) => {
                ScoringFault::classify(e.status().map(|s| s.as_u16()), None, &e.to_string())
            }
            LlmError::Parse(e) => {
                ScoringFault::Service(format!("unreadable response envelope: {e}"))
            }
            empty @ LlmError::EmptyContent => ScoringFault::Service(empty.to_string()),
        }
    }
}

/// Sends a prompt to the external generative-text service and returns its raw text.
/// Exactly one call per invocation; no internal retry.
#[async_trait]
pub trait ScoringClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ScoringFault>;
}

#[async_trait]
impl ScoringClient for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, ScoringFault> {
        self.call_text(prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(ScoringFault::from)
    }
}
