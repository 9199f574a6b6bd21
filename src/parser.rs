// src/parser.rs

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::models::question::{AnswerKey, QuestionDraft};

fn fenced_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*([\[\{].*[\]\}])\s*```").unwrap())
}

fn trailing_comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s*([\]\}])").unwrap())
}

/// Locate the JSON payload inside free-form model output: a fenced code
/// block wins, otherwise the widest `[...]`/`{...}` span (first opening to
/// last closing bracket).
pub fn extract_json_span(text: &str) -> Option<&str> {
    if let Some(caps) = fenced_block_re().captures(text) {
        return caps.get(1).map(|m| m.as_str());
    }
    let start = text.find(['[', '{'])?;
    let end = text.rfind([']', '}'])?;
    if end > start { Some(&text[start..=end]) } else { None }
}

/// Repair pass: models frequently emit single-quoted pseudo-JSON.
pub fn normalize_quotes(input: &str) -> String {
    input.replace('\'', "\"")
}

/// Repair pass: drop a comma that directly precedes a closing bracket.
pub fn strip_trailing_commas(input: &str) -> String {
    trailing_comma_re().replace_all(input, "$1").into_owned()
}

/// Strict parse first, then the repair passes in order, each applied to the
/// original span.
fn parse_lenient(span: &str) -> Result<Value, AppError> {
    if let Ok(value) = serde_json::from_str(span) {
        return Ok(value);
    }
    if let Ok(value) = serde_json::from_str(&normalize_quotes(span)) {
        return Ok(value);
    }
    if let Ok(value) = serde_json::from_str(&strip_trailing_commas(span)) {
        return Ok(value);
    }
    Err(AppError::Parse(
        "model output is not valid JSON, even after repairs".to_string(),
    ))
}

/// First non-empty string value among the given keys, trimmed.
/// Non-string values count as absent.
fn text_field(item: &Map<String, Value>, keys: &[&str]) -> String {
    for key in keys {
        if let Some(Value::String(s)) = item.get(*key) {
            if !s.is_empty() {
                return s.trim().to_string();
            }
        }
    }
    String::new()
}

fn normalize_item(item: &Map<String, Value>) -> QuestionDraft {
    let correct_raw = text_field(item, &["correct_option", "answer"]);
    QuestionDraft {
        text: text_field(item, &["text"]),
        option_a: text_field(item, &["option_a", "a"]),
        option_b: text_field(item, &["option_b", "b"]),
        option_c: text_field(item, &["option_c", "c"]),
        option_d: text_field(item, &["option_d", "d"]),
        correct_option: AnswerKey::from_loose(&correct_raw),
        explanation: text_field(item, &["explanation"]),
    }
}

/// Coerce raw provider output into normalized question drafts.
///
/// The parsed value must be an array; elements that are not objects are
/// skipped rather than aborting the batch, and the result is cut to
/// `max_questions`. Fewer items than requested is not an error. The whole
/// function is deterministic: parsing the same raw text twice yields the
/// same drafts.
pub fn parse_questions(raw: &str, max_questions: usize) -> Result<Vec<QuestionDraft>, AppError> {
    let span = extract_json_span(raw).unwrap_or(raw);
    let value = parse_lenient(span)?;

    let Value::Array(items) = value else {
        return Err(AppError::Parse(
            "model returned JSON, but not an array".to_string(),
        ));
    };

    let mut drafts = Vec::new();
    for item in &items {
        match item {
            Value::Object(map) => drafts.push(normalize_item(map)),
            _ => tracing::debug!("skipping non-object element in model output"),
        }
    }
    drafts.truncate(max_questions);
    Ok(drafts)
}
