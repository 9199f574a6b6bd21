// src/services/queries.rs

use crate::error::AppError;
use crate::lifecycle::QuizStatus;
use crate::models::creator::Creator;
use crate::models::quiz::{Quiz, QuizDetail};
use crate::store::QuizStore;

/// Current lifecycle status of a quiz. This is what submitters poll while a
/// generation job is running.
pub async fn quiz_status(store: &dyn QuizStore, quiz_id: i64) -> Result<QuizStatus, AppError> {
    let quiz = store
        .quiz_by_id(quiz_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("quiz {} not found", quiz_id)))?;
    Ok(quiz.status)
}

/// A quiz together with its questions.
///
/// Quizzes that are not `ready` are visible only to their creator or a
/// privileged role; anonymous callers see `ready` quizzes only.
pub async fn quiz_detail(
    store: &dyn QuizStore,
    quiz_id: i64,
    caller: Option<&Creator>,
) -> Result<QuizDetail, AppError> {
    let quiz = store
        .quiz_by_id(quiz_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("quiz {} not found", quiz_id)))?;

    if quiz.status != QuizStatus::Ready {
        let authorized = caller
            .map(|c| c.role.is_privileged() || quiz.creator_id == c.id)
            .unwrap_or(false);
        if !authorized {
            return Err(AppError::Permission(
                "not authorized to view this quiz".to_string(),
            ));
        }
    }

    let questions = store.questions_by_quiz(quiz_id).await?;
    Ok(QuizDetail { quiz, questions })
}

/// Most recent ready quizzes, for public listings.
pub async fn ready_quizzes(store: &dyn QuizStore, limit: i64) -> Result<Vec<Quiz>, AppError> {
    store.recent_by_status(QuizStatus::Ready, limit).await
}

/// The caller's own quizzes, most recent first. Teacher-only, matching the
/// submission side.
pub async fn quizzes_by_creator(
    store: &dyn QuizStore,
    caller: &Creator,
) -> Result<Vec<Quiz>, AppError> {
    if !caller.role.is_privileged() {
        return Err(AppError::Permission(
            "only teachers can list their quizzes".to_string(),
        ));
    }
    store.quizzes_by_creator(caller.id).await
}
