//! File intake: stores one uploaded resume under a unique path and owns its deletion.

use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use tracing::{debug, warn};

/// A resume upload on disk, exclusively owned by the request that received it.
///
/// Call [`UploadedResume::cleanup`] once processing ends. If the guard is dropped
/// without it (panic, cancelled future) the file is still removed on drop.
#[derive(Debug)]
pub struct UploadedResume {
    file: NamedTempFile,
    original_name: Option<String>,
}

impl UploadedResume {
    /// Writes `bytes` to a fresh `resume-*.pdf` file inside `upload_dir`.
    pub async fn store(
        upload_dir: &Path,
        original_name: Option<String>,
        bytes: &[u8],
    ) -> std::io::Result<Self> {
        let file = Builder::new()
            .prefix("resume-")
            .suffix(".pdf")
            .tempfile_in(upload_dir)?;
        tokio::fs::write(file.path(), bytes).await?;

        debug!(
            "Stored upload {:?} ({} bytes) at {}",
            original_name,
            bytes.len(),
            file.path().display()
        );

        Ok(Self {
            file,
            original_name,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn original_name(&self) -> Option<&str> {
        self.original_name.as_deref()
    }

    /// Deletes the file from storage. Returns the path that was removed.
    pub fn cleanup(self) -> PathBuf {
        let path = self.file.path().to_path_buf();
        if !path.exists() {
            debug!("Upload {} already gone", path.display());
            return path;
        }
        match self.file.close() {
            Ok(()) => debug!("Cleaned up uploaded resume file: {}", path.display()),
            Err(e) => warn!("Failed to delete uploaded resume {}: {e}", path.display()),
        }
        path
    }
}
