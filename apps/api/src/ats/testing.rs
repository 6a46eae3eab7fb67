//! In-memory fakes for the pipeline's injected clients.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ats::extract::{ExtractionError, TextExtractor};
use crate::ats::scoring::{ScoringClient, ScoringFault};

pub struct FakeExtractor {
    outcome: Result<String, String>,
    calls: AtomicUsize,
    saw_file: AtomicBool,
}

impl FakeExtractor {
    pub fn text(text: &str) -> Self {
        Self::with(Ok(text.to_string()))
    }

    pub fn failing(message: &str) -> Self {
        Self::with(Err(message.to_string()))
    }

    fn with(outcome: Result<String, String>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            saw_file: AtomicBool::new(false),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Whether the upload was still on disk when extraction ran.
    pub fn saw_existing_file(&self) -> bool {
        self.saw_file.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextExtractor for FakeExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.saw_file.store(path.exists(), Ordering::SeqCst);
        self.outcome
            .clone()
            .map_err(ExtractionError::Document)
    }
}

pub struct FakeScorer {
    outcome: Result<String, ScoringFault>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FakeScorer {
    pub fn reply(raw: &str) -> Self {
        Self::with(Ok(raw.to_string()))
    }

    pub fn failing(fault: ScoringFault) -> Self {
        Self::with(Err(fault))
    }

    fn with(outcome: Result<String, ScoringFault>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScoringClient for FakeScorer {
    async fn generate(&self, prompt: &str) -> Result<String, ScoringFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.outcome.clone()
    }
}
