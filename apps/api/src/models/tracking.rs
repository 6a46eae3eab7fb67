use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TrackedInternshipRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub company: String,
    pub link: String,
    pub ats: Option<String>,
    pub tracked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub stipend: Option<String>,
    pub link: Option<String>,
    pub apply: Option<String>,
    pub ats: Option<String>,
    pub status: String,
    pub tracked_at: DateTime<Utc>,
}

/// Where an application sits in the hiring funnel. Stored as TEXT.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Interview,
    Selected,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interview,
        ApplicationStatus::Selected,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Selected => "Selected",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| {
                format!(
                    "status must be one of {}",
                    Self::ALL.map(|s| s.as_str()).join(", ")
                )
            })
    }
}
