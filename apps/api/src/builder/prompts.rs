// Resume builder LLM prompt templates.

pub const SUMMARY_SYSTEM: &str = "\
You are a resume writing assistant. \
Respond with the summary text only. No headings, no markdown, no preamble.";

pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Write a professional, first-person resume summary in 3 crisp lines. Use "I" instead of third-person names.
Keep the tone confident but authentic, suitable for job applications.

Here are the details:
Name: {name}
Career Goal: {goal}
Skills: {skills}
Education: {education}
Experience: {experience}
Projects: {projects}

Start directly with the summary. Do not repeat the inputs."#;
