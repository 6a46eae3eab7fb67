//! Axum route handlers for the ATS scoring endpoints.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::debug;

use crate::ats::intake::UploadedResume;
use crate::ats::parser::{MatchScore, ScoreResult};
use crate::ats::pipeline::{AtsError, AtsPipeline};

/// Multipart field carrying the resume file.
pub const RESUME_FIELD: &str = "resume";
/// Multipart text field carrying the job description for `/api/ats-match`.
pub const JOB_DESCRIPTION_FIELD: &str = "jobDescription";

/// The stored resume plus any job description sent alongside it.
struct ResumeForm {
    upload: UploadedResume,
    job_description: Option<String>,
}

/// POST /api/ats-score
///
/// Accepts one PDF in the `resume` field and returns an ATS verdict.
/// A request that is not `multipart/form-data` counts as carrying no file.
pub async fn handle_ats_score(
    State(pipeline): State<Arc<AtsPipeline>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ScoreResult>, AtsError> {
    let form = receive_resume(multipart, pipeline.upload_dir()).await?;
    let result = pipeline.run(form.upload).await?;
    Ok(Json(result))
}

/// POST /api/ats-match
///
/// Rates the `resume` PDF against the `jobDescription` text field.
pub async fn handle_ats_match(
    State(pipeline): State<Arc<AtsPipeline>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MatchScore>, AtsError> {
    let form = receive_resume(multipart, pipeline.upload_dir()).await?;
    let job_description = form
        .job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or(AtsError::MissingJobDescription)?;
    let result = pipeline.run_match(form.upload, &job_description).await?;
    Ok(Json(result))
}

/// Reads the multipart body and stores the single `resume` file.
/// Other fields, and `resume` fields that are not files, are skipped.
async fn receive_resume(
    multipart: Result<Multipart, MultipartRejection>,
    upload_dir: &Path,
) -> Result<ResumeForm, AtsError> {
    let mut multipart = multipart.map_err(|rejection| {
        debug!("ATS request without multipart body: {rejection}");
        AtsError::NoFileUploaded
    })?;
    let mut upload: Option<UploadedResume> = None;
    let mut job_description = None;

    while let Some(field) = multipart.next_field().await? {
        let is_file = field.file_name().is_some();
        if field.name() == Some(JOB_DESCRIPTION_FIELD) && !is_file {
            job_description = Some(field.text().await?);
            continue;
        }
        if field.name() != Some(RESUME_FIELD) || !is_file {
            continue;
        }
        if upload.is_some() {
            // the stored one is removed when `upload` drops
            return Err(AtsError::TooManyFiles);
        }
        let original_name = field.file_name().map(String::from);
        let data: Bytes = field.bytes().await?;
        upload = Some(UploadedResume::store(upload_dir, original_name, &data).await?);
    }

    let upload = upload.ok_or(AtsError::NoFileUploaded)?;
    Ok(ResumeForm {
        upload,
        job_description,
    })
}
