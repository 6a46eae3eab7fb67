//! Axum route handlers for internship and application tracking.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extractors::{ApiJson, ApiPath};
use crate::models::tracking::{ApplicationRow, ApplicationStatus, TrackedInternshipRow};
use crate::state::AppState;
use crate::tracking::store::{
    delete_tracked_internship, insert_application, insert_tracked_internship, list_applications,
    list_tracked_internships, update_application_status, NewApplication, NewTrackedInternship,
};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInternshipRequest {
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub link: Option<String>,
    pub ats: Option<String>,
}

impl TrackInternshipRequest {
    /// userId, title, company and link are required and must not be blank.
    pub fn validate(self) -> Result<NewTrackedInternship, AppError> {
        let missing = || AppError::Validation("Missing required fields".to_string());
        Ok(NewTrackedInternship {
            user_id: parse_user_id(required(self.user_id).ok_or_else(missing)?)?,
            title: required(self.title).ok_or_else(missing)?,
            company: required(self.company).ok_or_else(missing)?,
            link: required(self.link).ok_or_else(missing)?,
            ats: self.ats,
        })
    }
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_user_id(value: String) -> Result<Uuid, AppError> {
    value
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid userId '{value}'")))
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub stipend: Option<String>,
    pub link: Option<String>,
    pub apply: Option<String>,
    pub ats: Option<String>,
    pub status: Option<String>,
}

impl CreateApplicationRequest {
    pub fn validate(self) -> Result<NewApplication, AppError> {
        let user_id = required(self.user_id)
            .ok_or_else(|| AppError::Validation("Missing required fields".to_string()))?;
        let user_id = parse_user_id(user_id)?;
        let status = match self.status.as_deref() {
            Some(s) => s.parse().map_err(AppError::Validation)?,
            None => ApplicationStatus::default(),
        };
        Ok(NewApplication {
            user_id,
            title: self.title,
            company: self.company,
            location: self.location,
            stipend: self.stipend,
            link: self.link,
            apply: self.apply,
            ats: self.ats,
            status,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Tracked internships
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/track-internship
pub async fn handle_track_internship(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TrackInternshipRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let new = request.validate()?;
    let id = insert_tracked_internship(&state.db, &new).await?;
    info!("User {} tracked internship {id}", new.user_id);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Internship tracked successfully".to_string(),
            id: Some(id),
        }),
    ))
}

/// GET /api/tracked-internships/:user_id
pub async fn handle_list_tracked_internships(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Vec<TrackedInternshipRow>>, AppError> {
    Ok(Json(list_tracked_internships(&state.db, user_id).await?))
}

/// DELETE /api/untrack-internship/:id
pub async fn handle_untrack_internship(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !delete_tracked_internship(&state.db, id).await? {
        return Err(AppError::NotFound("Internship not found".to_string()));
    }
    Ok(Json(MessageResponse {
        message: "Internship untracked successfully".to_string(),
        id: None,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Applications
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/track
pub async fn handle_create_application(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    let new = request.validate()?;
    let row = insert_application(&state.db, &new).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/my-applications/:user_id
pub async fn handle_list_applications(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    Ok(Json(list_applications(&state.db, user_id).await?))
}

/// PUT /api/update-status/:id
pub async fn handle_update_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateStatusRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let status: ApplicationStatus = request.status.parse().map_err(AppError::Validation)?;
    let row = update_application_status(&state.db, id, status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok(Json(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn track_request(value: serde_json::Value) -> TrackInternshipRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_track_request_valid() {
        let user_id = Uuid::new_v4();
        let new = track_request(json!({
            "userId": user_id,
            "title": " Backend Intern ",
            "company": "Acme",
            "link": "https://acme.dev/jobs/1",
            "ats": "82"
        }))
        .validate()
        .unwrap();

        assert_eq!(new.user_id, user_id);
        assert_eq!(new.title, "Backend Intern");
        assert_eq!(new.ats.as_deref(), Some("82"));
    }

    #[test]
    fn test_track_request_missing_field_rejected() {
        let result = track_request(json!({
            "userId": Uuid::new_v4(),
            "title": "Backend Intern",
            "link": "https://acme.dev/jobs/1"
        }))
        .validate();
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == "Missing required fields"));
    }

    #[test]
    fn test_track_request_blank_field_rejected() {
        let result = track_request(json!({
            "userId": Uuid::new_v4(),
            "title": "   ",
            "company": "Acme",
            "link": "https://acme.dev/jobs/1"
        }))
        .validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_track_request_missing_user_rejected() {
        let result = track_request(json!({
            "title": "Intern",
            "company": "Acme",
            "link": "https://acme.dev"
        }))
        .validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_application_defaults_to_applied() {
        let request: CreateApplicationRequest = serde_json::from_value(json!({
            "userId": Uuid::new_v4(),
            "title": "Data Intern",
            "stipend": "10000/month"
        }))
        .unwrap();
        let new = request.validate().unwrap();
        assert_eq!(new.status, ApplicationStatus::Applied);
        assert_eq!(new.stipend.as_deref(), Some("10000/month"));
    }

    #[test]
    fn test_application_with_unknown_status_rejected() {
        let request: CreateApplicationRequest = serde_json::from_value(json!({
            "userId": Uuid::new_v4(),
            "status": "Ghosted"
        }))
        .unwrap();
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_track_request_blank_user_is_missing_field() {
        for user_id in ["", "   "] {
            let result = track_request(json!({
                "userId": user_id,
                "title": "Intern",
                "company": "Acme",
                "link": "https://acme.dev"
            }))
            .validate();
            assert!(matches!(result, Err(AppError::Validation(msg)) if msg == "Missing required fields"));
        }
    }

    #[test]
    fn test_track_request_malformed_user_rejected() {
        let result = track_request(json!({
            "userId": "user-42",
            "title": "Intern",
            "company": "Acme",
            "link": "https://acme.dev"
        }))
        .validate();
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("user-42")));
    }

    #[test]
    fn test_application_without_user_rejected() {
        let request: CreateApplicationRequest =
            serde_json::from_value(json!({"title": "Data Intern"})).unwrap();
        assert!(matches!(request.validate(), Err(AppError::Validation(msg)) if msg == "Missing required fields"));
    }

    #[test]
    fn test_message_response_omits_missing_id() {
        let value = serde_json::to_value(MessageResponse {
            message: "ok".into(),
            id: None,
        })
        .unwrap();
        assert!(value.get("id").is_none());
    }
}
