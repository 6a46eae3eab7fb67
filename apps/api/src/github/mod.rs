//! GitHub profile import: aggregates a public profile and its repositories
//! into resume-ready fields.

pub mod handlers;

use std::collections::HashSet;

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const TOP_PROJECTS: usize = 5;
const REPOS_PER_PAGE: u32 = 100;
const NO_DESCRIPTION: &str = "No description";
const MAX_USERNAME_LEN: usize = 39;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("GitHub user '{0}' not found")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    name: Option<String>,
    bio: Option<String>,
    email: Option<String>,
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubRepo {
    name: String,
    description: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedProject {
    pub title: String,
    pub description: String,
}

/// Resume-ready view of a GitHub account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GithubProfile {
    pub name: String,
    pub bio: String,
    pub email: String,
    pub location: String,
    /// Most-starred repositories, at most five.
    pub projects: Vec<ImportedProject>,
    /// Distinct repository languages, most-starred repository first.
    pub skills: Vec<String>,
}

/// Thin client over the public GitHub REST API.
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(base_url: String, token: Option<String>) -> Result<Self, GithubError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Fetches the user and their repositories concurrently and summarizes them.
    pub async fn fetch_profile(&self, username: &str) -> Result<GithubProfile, GithubError> {
        let user_url = format!("{}/users/{username}", self.base_url);
        let repos_url = format!(
            "{}/users/{username}/repos?per_page={REPOS_PER_PAGE}",
            self.base_url
        );

        let (user, repos) = tokio::try_join!(
            self.get_json::<GithubUser>(&user_url, username),
            self.get_json::<Vec<GithubRepo>>(&repos_url, username),
        )?;

        debug!("Fetched {} repos for GitHub user {username}", repos.len());
        Ok(summarize_profile(username, user, repos))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        username: &str,
    ) -> Result<T, GithubError> {
        let mut request = self
            .client
            .get(url)
            .header("accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GithubError::NotFound(username.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GithubError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

/// GitHub logins: 1–39 ASCII alphanumerics or single hyphens, no leading/trailing hyphen.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= MAX_USERNAME_LEN
        && !username.starts_with('-')
        && !username.ends_with('-')
        && !username.contains("--")
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn summarize_profile(username: &str, user: GithubUser, mut repos: Vec<GithubRepo>) -> GithubProfile {
    // stable: ties keep API order
    repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));

    let projects = repos
        .iter()
        .take(TOP_PROJECTS)
        .map(|repo| ImportedProject {
            title: repo.name.clone(),
            description: non_blank(repo.description.clone())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        })
        .collect();

    let mut seen = HashSet::new();
    let skills = repos
        .iter()
        .filter_map(|repo| non_blank(repo.language.clone()))
        .filter(|lang| seen.insert(lang.clone()))
        .collect();

    GithubProfile {
        name: non_blank(user.name).unwrap_or_else(|| username.to_string()),
        bio: user.bio.unwrap_or_default(),
        email: user.email.unwrap_or_default(),
        location: user.location.unwrap_or_default(),
        projects,
        skills,
    }
}
