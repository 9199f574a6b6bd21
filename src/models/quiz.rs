// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::lifecycle::QuizStatus;
use crate::models::question::Question;

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,

    /// Owning creator; cascade-deletes questions when the quiz goes away.
    pub creator_id: i64,

    pub title: String,
    pub topic: Option<String>,
    pub description: Option<String>,

    /// Free-form difficulty label ("any" when unspecified).
    pub difficulty: String,

    pub status: QuizStatus,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for a quiz together with its questions, as returned by the detail
/// query. Visibility of non-`ready` quizzes is gated by the caller identity.
#[derive(Debug, Clone, Serialize)]
pub struct QuizDetail {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<Question>,
}

/// DTO for submitting a new generation request.
/// Checked before any quiz row or staged file exists.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title length must be between 1 and 255 characters."
    ))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub topic: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub difficulty: Option<String>,

    /// Requested question count; falls back to the configured default.
    #[validate(range(min = 1, max = 50))]
    pub num_questions: Option<u32>,

    /// Optional provider model override, forwarded verbatim.
    pub model: Option<String>,
}
