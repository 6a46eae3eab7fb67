// ATS scoring prompt template.

/// Maximum number of resume characters embedded in a scoring prompt.
pub const RESUME_CHAR_BUDGET: usize = 12_000;

pub const ATS_SCORE_PROMPT: &str = r#"You are an ATS (Applicant Tracking System) bot. Given a resume, provide:
1. A numeric ATS score (0-100)
2. A brief summary
3. A list of strengths
4. A list of suggestions for improvement

Return the response strictly as a JSON object with exactly these keys:

{
  "score": 85,
  "summary": "Brief summary of the candidate...",
  "strengths": ["Point 1", "Point 2"],
  "suggestions": ["Point 1", "Point 2"]
}

"score" must be an integer from 0 to 100. "strengths" and "suggestions" are lists of strings.
No other shape is acceptable.

Resume:
"""{resume_text}""""#;

/// Builds the scoring prompt, embedding at most `RESUME_CHAR_BUDGET` characters of resume text.
pub fn build_ats_prompt(resume_text: &str) -> String {
    ATS_SCORE_PROMPT.replace("{resume_text}", truncate_chars(resume_text, RESUME_CHAR_BUDGET))
}

/// Per-input character budget for resume/job-description matching.
pub const MATCH_CHAR_BUDGET: usize = 3_000;

const JOB_MATCH_INSTRUCTION: &str =
    "You are an ATS. Rate how well the resume fits the job from 0-100. Return only a number.";

/// Builds the job-match prompt, each input cut to `MATCH_CHAR_BUDGET` characters.
pub fn build_match_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        "{JOB_MATCH_INSTRUCTION}\n\nResume: {}\nJob Description: {}",
        truncate_chars(resume_text, MATCH_CHAR_BUDGET),
        truncate_chars(job_description, MATCH_CHAR_BUDGET)
    )
}

/// Returns the prefix of `text` holding at most `max_chars` characters.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
