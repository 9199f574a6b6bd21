// src/lifecycle.rs

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::store::QuizStore;

/// Lifecycle status of a quiz.
///
/// `Draft` is the initial state and the terminal state of every failed
/// generation; `Generating` is transient; `Ready` is the terminal state of a
/// successful generation. Visibility of a quiz to non-owners is gated on
/// `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizStatus {
    Draft,
    Generating,
    Ready,
}

impl QuizStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QuizStatus::Draft => "draft",
            QuizStatus::Generating => "generating",
            QuizStatus::Ready => "ready",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(QuizStatus::Draft),
            "generating" => Some(QuizStatus::Generating),
            "ready" => Some(QuizStatus::Ready),
            _ => None,
        }
    }

    /// The full transition table. Note the absence of a
    /// `Generating -> Generating` edge: a rebuild issued while a job is
    /// still in flight is rejected instead of stacking a second job on the
    /// same quiz.
    pub fn can_transition(self, next: QuizStatus) -> bool {
        matches!(
            (self, next),
            (QuizStatus::Draft, QuizStatus::Generating)
                | (QuizStatus::Generating, QuizStatus::Ready)
                | (QuizStatus::Generating, QuizStatus::Draft)
                | (QuizStatus::Ready, QuizStatus::Generating)
        )
    }
}

impl fmt::Display for QuizStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only writer of `Quiz.status`. Both the job runner and the submission
/// service go through here, so every status change is checked against the
/// transition table.
#[derive(Clone)]
pub struct Lifecycle {
    store: Arc<dyn QuizStore>,
}

impl Lifecycle {
    pub fn new(store: Arc<dyn QuizStore>) -> Self {
        Self { store }
    }

    /// Move a quiz to `next`, or fail with `NotFound` (no such quiz) or
    /// `Conflict` (the edge is not in the transition table).
    pub async fn transition(&self, quiz_id: i64, next: QuizStatus) -> Result<(), AppError> {
        let quiz = self
            .store
            .quiz_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("quiz {} not found", quiz_id)))?;

        if !quiz.status.can_transition(next) {
            return Err(AppError::Conflict(format!(
                "illegal status change {} -> {} for quiz {}",
                quiz.status, next, quiz_id
            )));
        }

        self.store.set_quiz_status(quiz_id, next).await?;
        tracing::debug!(quiz_id, from = %quiz.status, to = %next, "quiz status changed");
        Ok(())
    }
}
