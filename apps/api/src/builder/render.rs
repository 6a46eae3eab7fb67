//! HTML rendering for generated resumes. Handlebars escapes every interpolated value.

use handlebars::{Handlebars, RenderError};
use serde_json::json;

use crate::builder::GenerateResumeRequest;

const MODERN_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{name}} | Resume</title>
<style>
  body { font-family: "Inter", "Helvetica Neue", Arial, sans-serif; margin: 40px; color: #222; }
  h1 { margin-bottom: 4px; }
  .contact { color: #555; margin-bottom: 24px; }
  h2 { border-bottom: 2px solid #2b6cb0; padding-bottom: 4px; color: #2b6cb0; }
  ul { padding-left: 20px; }
  li { margin-bottom: 6px; }
</style>
</head>
<body>
  <h1>{{name}}</h1>
  <div class="contact">{{email}} | {{phone}} | {{linkedin}}</div>
  <h2>Summary</h2>
  <p>{{summary}}</p>
  <h2>Skills</h2>
  <p>{{skills}}</p>
  <h2>Education</h2>
  <ul>{{#each education}}<li><strong>{{degree}}</strong>, {{institution}} ({{year}})</li>{{/each}}</ul>
  <h2>Experience</h2>
  <ul>{{#each experience}}<li><strong>{{role}}</strong> at {{company}} ({{year}})<br>{{description}}</li>{{/each}}</ul>
  <h2>Projects</h2>
  <ul>{{#each projects}}<li><strong>{{title}}</strong>: {{description}}</li>{{/each}}</ul>
</body>
</html>
"#;

/// Renders the resume page from the request and the generated summary lines.
pub fn render_resume_html(
    request: &GenerateResumeRequest,
    summary: &[String],
) -> Result<String, RenderError> {
    let data = json!({
        "name": request.name,
        "email": request.email,
        "phone": request.phone,
        "linkedin": request.linkedin,
        "summary": summary.join(" "),
        "skills": request.skill_list().join(", "),
        "education": request.education,
        "experience": request.experience,
        "projects": request.projects,
    });
    Handlebars::new().render_template(MODERN_TEMPLATE, &data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{EducationItem, ExperienceItem, ProjectItem};

    #[test]
    fn test_render_fills_every_placeholder() {
        let request = GenerateResumeRequest {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            skills: "Rust, SQL".into(),
            education: vec![EducationItem {
                degree: "BSc CS".into(),
                institution: "State University".into(),
                year: "2025".into(),
            }],
            experience: vec![ExperienceItem {
                role: "Intern".into(),
                company: "Acme".into(),
                year: "2024".into(),
                description: "Cut p99 latency by 40%".into(),
            }],
            projects: vec![ProjectItem {
                title: "ats-api".into(),
                description: "Scores resumes".into(),
            }],
            ..Default::default()
        };
        let html =
            render_resume_html(&request, &["I build backends.".into(), "I ship.".into()]).unwrap();

        assert!(!html.contains("{{"));
        assert!(html.contains("<h1>Jane Doe</h1>"));
        assert!(html.contains("<p>I build backends. I ship.</p>"));
        assert!(html.contains("<p>Rust, SQL</p>"));
        assert!(html.contains("<li><strong>BSc CS</strong>, State University (2025)</li>"));
        assert!(html.contains("<li><strong>Intern</strong> at Acme (2024)<br>Cut p99 latency by 40%</li>"));
        assert!(html.contains("<li><strong>ats-api</strong>: Scores resumes</li>"));
    }

    #[test]
    fn test_render_escapes_user_values() {
        let request = GenerateResumeRequest {
            name: "<img src=x onerror=alert(1)>".into(),
            projects: vec![ProjectItem {
                title: "<script>".into(),
                description: "a & b".into(),
            }],
            ..Default::default()
        };
        let html = render_resume_html(&request, &[]).unwrap();
        assert!(!html.contains("<img"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;img"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn test_placeholder_text_in_user_values_stays_literal() {
        let request = GenerateResumeRequest {
            email: "{{projects}}".into(),
            phone: "{{#each projects}}x{{/each}}".into(),
            projects: vec![ProjectItem {
                title: "secret-proj".into(),
                description: "d".into(),
            }],
            ..Default::default()
        };
        let html = render_resume_html(&request, &[]).unwrap();

        assert!(html.contains(r#"<div class="contact">{{projects}} | {{#each projects}}x{{/each}} | </div>"#));
        assert_eq!(html.matches("secret-proj").count(), 1);
    }
}
