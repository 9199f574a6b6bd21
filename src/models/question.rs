// src/models/question.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label of the correct option of a multiple-choice question.
/// Serialized as the lowercase letters "a".."d".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKey {
    A,
    B,
    C,
    D,
}

impl AnswerKey {
    pub fn as_str(self) -> &'static str {
        match self {
            AnswerKey::A => "a",
            AnswerKey::B => "b",
            AnswerKey::C => "c",
            AnswerKey::D => "d",
        }
    }

    /// Exact lowercase label match.
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "a" => Some(AnswerKey::A),
            "b" => Some(AnswerKey::B),
            "c" => Some(AnswerKey::C),
            "d" => Some(AnswerKey::D),
            _ => None,
        }
    }

    /// Lenient coercion used when normalizing model output: trim and
    /// lowercase, accept an exact label, otherwise take the first character
    /// if it is itself a label, otherwise default to `A`.
    pub fn from_loose(raw: &str) -> Self {
        let lower = raw.trim().to_lowercase();
        if let Some(key) = Self::from_label(&lower) {
            return key;
        }
        lower
            .chars()
            .next()
            .map(|c| c.to_string())
            .as_deref()
            .and_then(Self::from_label)
            .unwrap_or(AnswerKey::A)
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents the 'questions' table in the database.
/// Rows are created only by the job runner after parser validation and are
/// immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,

    /// Question stem; never empty for a persisted row.
    pub text: String,

    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,

    pub correct_option: AnswerKey,

    /// May be empty when the model supplied none.
    pub explanation: String,

    /// Provenance flag for generated content.
    pub ai_generated: bool,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A normalized question as produced by the response parser, before it has
/// been persisted (and before the empty-text validity check).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: AnswerKey,
    pub explanation: String,
}
