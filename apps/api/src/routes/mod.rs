pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::ats::handlers::{handle_ats_match, handle_ats_score};
use crate::builder::handlers::handle_generate_resume;
use crate::github::handlers::handle_import_github;
use crate::state::AppState;
use crate::tracking::handlers;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);
    let ats_score = post(handle_ats_score).layer(upload_limit);

    Router::new()
        .route("/health", get(health::health_handler))
        // ATS scoring
        .route("/api/ats-score", ats_score.clone())
        .route("/ats-score", ats_score)
        .route("/api/ats-match", post(handle_ats_match).layer(upload_limit))
        // Internship tracking
        .route(
            "/api/track-internship",
            post(handlers::handle_track_internship),
        )
        .route(
            "/api/tracked-internships/:user_id",
            get(handlers::handle_list_tracked_internships),
        )
        .route(
            "/api/untrack-internship/:id",
            delete(handlers::handle_untrack_internship),
        )
        // Application pipeline
        .route("/api/track", post(handlers::handle_create_application))
        .route(
            "/api/my-applications/:user_id",
            get(handlers::handle_list_applications),
        )
        .route(
            "/api/update-status/:id",
            put(handlers::handle_update_status),
        )
        // Imports and resume builder
        .route("/api/import/github/:username", get(handle_import_github))
        .route("/api/generate-resume", post(handle_generate_resume))
        .with_state(state)
}
