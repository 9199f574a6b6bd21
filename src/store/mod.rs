// src/store/mod.rs

pub mod pg;

use async_trait::async_trait;

use crate::error::AppError;
use crate::lifecycle::QuizStatus;
use crate::models::question::{Question, QuestionDraft};
use crate::models::quiz::Quiz;

pub use pg::PgStore;

/// Values for a quiz row about to be created.
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub creator_id: i64,
    pub title: String,
    pub topic: Option<String>,
    pub description: Option<String>,
    pub difficulty: String,
    pub status: QuizStatus,
}

/// The transactional store the core runs against. Each method is a single
/// short transaction; no lock is held across a provider call.
///
/// `PgStore` is the production implementation; tests substitute an in-memory
/// one.
#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn create_quiz(&self, new: NewQuiz) -> Result<Quiz, AppError>;

    async fn quiz_by_id(&self, id: i64) -> Result<Option<Quiz>, AppError>;

    /// Raw status write; lifecycle checks happen in `Lifecycle`, which is
    /// the only caller outside of quiz creation.
    async fn set_quiz_status(&self, id: i64, status: QuizStatus) -> Result<(), AppError>;

    async fn insert_question(
        &self,
        quiz_id: i64,
        draft: &QuestionDraft,
        ai_generated: bool,
    ) -> Result<Question, AppError>;

    async fn questions_by_quiz(&self, quiz_id: i64) -> Result<Vec<Question>, AppError>;

    /// A creator's quizzes, most recent first.
    async fn quizzes_by_creator(&self, creator_id: i64) -> Result<Vec<Quiz>, AppError>;

    /// Most recent quizzes carrying the given status.
    async fn recent_by_status(
        &self,
        status: QuizStatus,
        limit: i64,
    ) -> Result<Vec<Quiz>, AppError>;
}
