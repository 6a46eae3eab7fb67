//! Response parser: turns raw model output into a `ScoreResult`.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_SUMMARY: &str = "No summary.";

/// Structured ATS verdict returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: u32, // 0 – 100
    pub summary: String,
    pub strengths: Vec<String>,
    pub suggestions: Vec<String>,
    /// Unmodified model output, for debugging.
    pub raw: String,
}

#[derive(Debug, Error)]
#[error("AI response is not valid JSON: {0}")]
pub struct MalformedAiResponse(#[from] serde_json::Error);

/// Resume-to-job fit score returned by the match endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchScore {
    pub score: u32,
    pub raw: String,
}

static FENCE: OnceLock<Regex> = OnceLock::new();
static FIRST_NUMBER: OnceLock<Regex> = OnceLock::new();

fn fence_pattern() -> &'static Regex {
    FENCE.get_or_init(|| Regex::new(r"(?is)```(?:json)?(.*?)```").expect("fence pattern compiles"))
}

/// Returns the interior of the first fenced code block, or the whole text when unfenced.
fn json_payload(raw: &str) -> &str {
    fence_pattern()
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(raw)
        .trim()
}

/// Parses model output into a `ScoreResult`.
///
/// Missing or mistyped fields fall back to defaults; only unparseable JSON is an error.
pub fn parse_score_response(raw: &str) -> Result<ScoreResult, MalformedAiResponse> {
    let parsed: Value = serde_json::from_str(json_payload(raw))?;

    Ok(ScoreResult {
        score: score_field(parsed.get("score")),
        summary: parsed
            .get("summary")
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SUMMARY)
            .to_string(),
        strengths: string_list(parsed.get("strengths")),
        suggestions: string_list(parsed.get("suggestions")),
        raw: raw.to_string(),
    })
}

/// Reads the first integer in the model output as the match score, clamped to 100.
/// Output without any digits scores 0.
pub fn parse_match_score(raw: &str) -> MatchScore {
    let score = FIRST_NUMBER
        .get_or_init(|| Regex::new(r"\d+").expect("number pattern compiles"))
        .find(raw)
        .map(|m| m.as_str().parse::<u64>().map_or(100, |n| n.min(100) as u32))
        .unwrap_or(0);
    MatchScore {
        score,
        raw: raw.to_string(),
    }
}

fn score_field(value: Option<&Value>) -> u32 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|n| n.is_finite())
        .map(|n| n.round().clamp(0.0, 100.0) as u32)
        .unwrap_or(0)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|item| item.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{"score": 85, "summary": "Strong backend profile.", "strengths": ["Rust", "Tokio"], "suggestions": ["Quantify impact"]}"#;

    #[test]
    fn test_unfenced_json_parses() {
        let result = parse_score_response(FULL).unwrap();
        assert_eq!(result.score, 85);
        assert_eq!(result.summary, "Strong backend profile.");
        assert_eq!(result.strengths, vec!["Rust", "Tokio"]);
        assert_eq!(result.suggestions, vec!["Quantify impact"]);
        assert_eq!(result.raw, FULL);
    }

    #[test]
    fn test_fenced_json_matches_unfenced() {
        let fenced = format!("```json\n{FULL}\n```");
        let from_fenced = parse_score_response(&fenced).unwrap();
        let from_plain = parse_score_response(FULL).unwrap();

        assert_eq!(from_fenced.score, from_plain.score);
        assert_eq!(from_fenced.summary, from_plain.summary);
        assert_eq!(from_fenced.strengths, from_plain.strengths);
        assert_eq!(from_fenced.suggestions, from_plain.suggestions);
        assert_eq!(from_fenced.raw, fenced);
    }

    #[test]
    fn test_fence_with_surrounding_prose() {
        let raw = format!("Here is the evaluation:\n```json {FULL}```\nGood luck!");
        assert_eq!(parse_score_response(&raw).unwrap().score, 85);
    }

    #[test]
    fn test_untagged_fence() {
        let raw = format!("```\n{FULL}\n```");
        assert_eq!(parse_score_response(&raw).unwrap().score, 85);
    }

    #[test]
    fn test_missing_fields_default() {
        let result = parse_score_response("{}").unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.summary, DEFAULT_SUMMARY);
        assert!(result.strengths.is_empty());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_partial_response_is_success() {
        let result = parse_score_response(r#"{"score": 72}"#).unwrap();
        assert_eq!(result.score, 72);
        assert_eq!(result.summary, DEFAULT_SUMMARY);
    }

    #[test]
    fn test_empty_summary_defaults() {
        let result = parse_score_response(r#"{"summary": "  "}"#).unwrap();
        assert_eq!(result.summary, DEFAULT_SUMMARY);
    }

    #[test]
    fn test_score_variants() {
        assert_eq!(parse_score_response(r#"{"score": 77.6}"#).unwrap().score, 78);
        assert_eq!(parse_score_response(r#"{"score": "64"}"#).unwrap().score, 64);
        assert_eq!(parse_score_response(r#"{"score": 140}"#).unwrap().score, 100);
        assert_eq!(parse_score_response(r#"{"score": -5}"#).unwrap().score, 0);
        assert_eq!(parse_score_response(r#"{"score": "high"}"#).unwrap().score, 0);
        assert_eq!(parse_score_response(r#"{"score": null}"#).unwrap().score, 0);
    }

    #[test]
    fn test_non_string_list_items_dropped() {
        let result = parse_score_response(r#"{"strengths": ["Rust", 3, null, "SQL"]}"#).unwrap();
        assert_eq!(result.strengths, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_non_object_json_yields_defaults() {
        let result = parse_score_response("42").unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.summary, DEFAULT_SUMMARY);
    }

    #[test]
    fn test_prose_is_malformed() {
        assert!(parse_score_response("I cannot score this resume.").is_err());
    }

    #[test]
    fn test_broken_fenced_json_is_malformed() {
        assert!(parse_score_response("```json\n{\"score\": 85,\n```").is_err());
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let raw = format!("```json\n{FULL}\n```");
        assert_eq!(
            parse_score_response(&raw).unwrap(),
            parse_score_response(&raw).unwrap()
        );
    }

    #[test]
    fn test_match_score_takes_first_number() {
        assert_eq!(parse_match_score("78").score, 78);
        assert_eq!(parse_match_score("Score: 64/100").score, 64);
        assert_eq!(parse_match_score(" 91\n").raw, " 91\n");
    }

    #[test]
    fn test_match_score_without_digits_is_zero() {
        assert_eq!(parse_match_score("No idea.").score, 0);
        assert_eq!(parse_match_score("").score, 0);
    }

    #[test]
    fn test_match_score_clamped() {
        assert_eq!(parse_match_score("250").score, 100);
        assert_eq!(parse_match_score("99999999999999999999999").score, 100);
    }
}
