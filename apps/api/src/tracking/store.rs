use sqlx::PgPool;
use uuid::Uuid;

use crate::models::tracking::{ApplicationRow, ApplicationStatus, TrackedInternshipRow};

/// Validated fields for a new tracked internship.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrackedInternship {
    pub user_id: Uuid,
    pub title: String,
    pub company: String,
    pub link: String,
    pub ats: Option<String>,
}

/// Fields for a new application. Only `user_id` is mandatory.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub user_id: Uuid,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub stipend: Option<String>,
    pub link: Option<String>,
    pub apply: Option<String>,
    pub ats: Option<String>,
    pub status: ApplicationStatus,
}

pub async fn insert_tracked_internship(
    pool: &PgPool,
    new: &NewTrackedInternship,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO tracked_internships (id, user_id, title, company, link, ats)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind(new.user_id)
    .bind(&new.title)
    .bind(&new.company)
    .bind(&new.link)
    .bind(&new.ats)
    .execute(pool)
    .await?;
    Ok(id)
}

/// Newest first.
pub async fn list_tracked_internships(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<TrackedInternshipRow>, sqlx::Error> {
    sqlx::query_as::<_, TrackedInternshipRow>(
        "SELECT * FROM tracked_internships WHERE user_id = $1 ORDER BY tracked_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Returns whether a row was deleted.
pub async fn delete_tracked_internship(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tracked_internships WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn insert_application(
    pool: &PgPool,
    new: &NewApplication,
) -> Result<ApplicationRow, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications
            (id, user_id, title, company, location, stipend, link, apply, ats, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.user_id)
    .bind(&new.title)
    .bind(&new.company)
    .bind(&new.location)
    .bind(&new.stipend)
    .bind(&new.link)
    .bind(&new.apply)
    .bind(&new.ats)
    .bind(new.status.as_str())
    .fetch_one(pool)
    .await
}

/// Newest first.
pub async fn list_applications(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE user_id = $1 ORDER BY tracked_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Returns the updated row, or `None` when no application has that id.
pub async fn update_application_status(
    pool: &PgPool,
    id: Uuid,
    status: ApplicationStatus,
) -> Result<Option<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        "UPDATE applications SET status = $1 WHERE id = $2 RETURNING *",
    )
    .bind(status.as_str())
    .bind(id)
    .fetch_optional(pool)
    .await
}
