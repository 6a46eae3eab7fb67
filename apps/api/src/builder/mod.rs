//! Resume builder: LLM-written summary plus an HTML resume rendered from user details.

pub mod handlers;
pub mod prompts;
pub mod render;

use serde::{Deserialize, Serialize};

use crate::builder::prompts::SUMMARY_PROMPT_TEMPLATE;

/// Number of summary lines kept from the model output.
pub const SUMMARY_LINES: usize = 3;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationItem {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceItem {
    pub role: String,
    pub company: String,
    pub year: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectItem {
    pub title: String,
    pub description: String,
}

/// Request body for `POST /api/generate-resume`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerateResumeRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub goal: String,
    pub education: Vec<EducationItem>,
    pub experience: Vec<ExperienceItem>,
    pub projects: Vec<ProjectItem>,
    /// Comma-separated, e.g. "Rust, SQL, Docker".
    pub skills: String,
}

impl GenerateResumeRequest {
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

pub fn build_summary_prompt(request: &GenerateResumeRequest) -> String {
    let education = request
        .education
        .iter()
        .map(|e| format!("{} from {} in {}", e.degree, e.institution, e.year))
        .collect::<Vec<_>>()
        .join(", ");
    let experience = request
        .experience
        .iter()
        .map(|e| format!("{} at {} ({}) - {}", e.role, e.company, e.year, e.description))
        .collect::<Vec<_>>()
        .join(", ");
    let projects = request
        .projects
        .iter()
        .map(|p| format!("{} - {}", p.title, p.description))
        .collect::<Vec<_>>()
        .join(", ");

    SUMMARY_PROMPT_TEMPLATE
        .replace("{name}", &request.name)
        .replace("{goal}", &request.goal)
        .replace("{skills}", &request.skill_list().join(", "))
        .replace("{education}", &education)
        .replace("{experience}", &experience)
        .replace("{projects}", &projects)
}

/// Keeps the first `SUMMARY_LINES` non-empty lines of the model output, trimmed.
pub fn summary_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(SUMMARY_LINES)
        .map(String::from)
        .collect()
}
