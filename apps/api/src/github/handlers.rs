use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::extractors::ApiPath;
use crate::github::{is_valid_username, GithubError, GithubProfile};
use crate::state::AppState;

impl From<GithubError> for AppError {
    fn from(err: GithubError) -> Self {
        match err {
            GithubError::NotFound(_) => AppError::NotFound(err.to_string()),
            other => AppError::Upstream(format!("Failed to fetch GitHub data: {other}")),
        }
    }
}

/// GET /api/import/github/:username
pub async fn handle_import_github(
    State(state): State<AppState>,
    ApiPath(username): ApiPath<String>,
) -> Result<Json<GithubProfile>, AppError> {
    if !is_valid_username(&username) {
        return Err(AppError::Validation(format!(
            "'{username}' is not a valid GitHub username"
        )));
    }

    let profile = state.github.fetch_profile(&username).await?;
    Ok(Json(profile))
}
