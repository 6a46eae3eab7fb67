//! Text extraction: turns a page-oriented document on disk into one plain string.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not read document: {0}")]
    Document(String),

    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Extracts plain text from an uploaded document.
///
/// Carried in `AtsPipeline` as `Arc<dyn TextExtractor>` so tests can swap in fakes.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// PDF extractor backed by `pdf-extract`. Parsing runs on the blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let path: PathBuf = path.to_path_buf();
        // pdf-extract can panic on malformed input; the join error surfaces it as Task.
        let pages = tokio::task::spawn_blocking(move || pdf_extract::extract_text_by_pages(&path))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))?
            .map_err(|e| ExtractionError::Document(e.to_string()))?;

        debug!("Extracted text from {} page(s)", pages.len());
        Ok(join_pages(pages.iter().map(String::as_str)))
    }
}

/// Joins per-page text: tokens within a page separated by one space,
/// pages separated by a newline, result trimmed.
pub fn join_pages<'a>(pages: impl IntoIterator<Item = &'a str>) -> String {
    pages
        .into_iter()
        .map(|page| page.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_normalizes_tokens_within_page() {
        let text = join_pages(["Jane   Doe\nRust\tEngineer", "Skills:  Tokio"]);
        assert_eq!(text, "Jane Doe Rust Engineer\nSkills: Tokio");
    }

    #[test]
    fn test_join_pages_trims_outer_whitespace() {
        let text = join_pages(["   ", "Experience", "  "]);
        assert_eq!(text, "Experience");
    }

    #[test]
    fn test_join_pages_empty_document() {
        assert_eq!(join_pages(Vec::<&str>::new()), "");
    }

    #[tokio::test]
    async fn test_pdf_extractor_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a-pdf.pdf");
        std::fs::write(&path, b"this is plain text, not a PDF").unwrap();

        let result = PdfTextExtractor.extract(&path).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_pdf_extractor_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdfTextExtractor.extract(&dir.path().join("missing.pdf")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_pdf_extractor_puts_each_page_on_its_own_line() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/two_page_resume.pdf");

        let text = PdfTextExtractor.extract(&path).await.unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2, "{text:?}");
        assert!(lines[0].contains("Jane") && lines[0].contains("Doe"), "{text:?}");
        assert!(lines[1].contains("Rust") && lines[1].contains("Engineer"), "{text:?}");
    }
}
