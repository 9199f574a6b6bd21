// src/store/pg.rs

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::error::AppError;
use crate::lifecycle::QuizStatus;
use crate::models::question::{AnswerKey, Question, QuestionDraft};
use crate::models::quiz::Quiz;
use crate::store::{NewQuiz, QuizStore};

/// Postgres-backed store.
///
/// Queries are built at runtime (`query_as` + `bind`) rather than with the
/// compile-time macros, since the store is an injected collaborator and the
/// crate must build without a live database.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

/// Raw quiz row; `status` is decoded from TEXT after the fetch.
#[derive(sqlx::FromRow)]
struct QuizRow {
    id: i64,
    creator_id: i64,
    title: String,
    topic: Option<String>,
    description: Option<String>,
    difficulty: String,
    status: String,
    created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: i64,
    quiz_id: i64,
    text: String,
    option_a: String,
    option_b: String,
    option_c: String,
    option_d: String,
    correct_option: String,
    explanation: Option<String>,
    ai_generated: bool,
    created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn into_quiz(row: QuizRow) -> Result<Quiz, AppError> {
    let status = QuizStatus::parse(&row.status).ok_or_else(|| {
        AppError::Storage(format!(
            "quiz {} carries unknown status '{}'",
            row.id, row.status
        ))
    })?;
    Ok(Quiz {
        id: row.id,
        creator_id: row.creator_id,
        title: row.title,
        topic: row.topic,
        description: row.description,
        difficulty: row.difficulty,
        status,
        created_at: row.created_at,
    })
}

fn into_question(row: QuestionRow) -> Result<Question, AppError> {
    let correct_option = AnswerKey::from_label(&row.correct_option).ok_or_else(|| {
        AppError::Storage(format!(
            "question {} carries unknown correct_option '{}'",
            row.id, row.correct_option
        ))
    })?;
    Ok(Question {
        id: row.id,
        quiz_id: row.quiz_id,
        text: row.text,
        option_a: row.option_a,
        option_b: row.option_b,
        option_c: row.option_c,
        option_d: row.option_d,
        correct_option,
        explanation: row.explanation.unwrap_or_default(),
        ai_generated: row.ai_generated,
        created_at: row.created_at,
    })
}

const QUIZ_COLUMNS: &str =
    "id, creator_id, title, topic, description, difficulty, status, created_at";
const QUESTION_COLUMNS: &str = "id, quiz_id, text, option_a, option_b, option_c, option_d, \
                                correct_option, explanation, ai_generated, created_at";

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&config.database_url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))
    }
}

#[async_trait]
impl QuizStore for PgStore {
    async fn create_quiz(&self, new: NewQuiz) -> Result<Quiz, AppError> {
        let sql = format!(
            "INSERT INTO quizzes (creator_id, title, topic, description, difficulty, status) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            QUIZ_COLUMNS
        );
        let row = sqlx::query_as::<_, QuizRow>(&sql)
            .bind(new.creator_id)
            .bind(&new.title)
            .bind(&new.topic)
            .bind(&new.description)
            .bind(&new.difficulty)
            .bind(new.status.as_str())
            .fetch_one(&self.pool)
            .await?;
        into_quiz(row)
    }

    async fn quiz_by_id(&self, id: i64) -> Result<Option<Quiz>, AppError> {
        let sql = format!("SELECT {} FROM quizzes WHERE id = $1", QUIZ_COLUMNS);
        let row = sqlx::query_as::<_, QuizRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(into_quiz).transpose()
    }

    async fn set_quiz_status(&self, id: i64, status: QuizStatus) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE quizzes SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("quiz {} not found", id)));
        }
        Ok(())
    }

    async fn insert_question(
        &self,
        quiz_id: i64,
        draft: &QuestionDraft,
        ai_generated: bool,
    ) -> Result<Question, AppError> {
        let sql = format!(
            "INSERT INTO questions \
             (quiz_id, text, option_a, option_b, option_c, option_d, correct_option, explanation, ai_generated) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}",
            QUESTION_COLUMNS
        );
        let row = sqlx::query_as::<_, QuestionRow>(&sql)
            .bind(quiz_id)
            .bind(&draft.text)
            .bind(&draft.option_a)
            .bind(&draft.option_b)
            .bind(&draft.option_c)
            .bind(&draft.option_d)
            .bind(draft.correct_option.as_str())
            .bind(&draft.explanation)
            .bind(ai_generated)
            .fetch_one(&self.pool)
            .await?;
        into_question(row)
    }

    async fn questions_by_quiz(&self, quiz_id: i64) -> Result<Vec<Question>, AppError> {
        let sql = format!(
            "SELECT {} FROM questions WHERE quiz_id = $1 ORDER BY id",
            QUESTION_COLUMNS
        );
        let rows = sqlx::query_as::<_, QuestionRow>(&sql)
            .bind(quiz_id)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(into_question).collect()
    }

    async fn quizzes_by_creator(&self, creator_id: i64) -> Result<Vec<Quiz>, AppError> {
        let sql = format!(
            "SELECT {} FROM quizzes WHERE creator_id = $1 ORDER BY created_at DESC, id DESC",
            QUIZ_COLUMNS
        );
        let rows = sqlx::query_as::<_, QuizRow>(&sql)
            .bind(creator_id)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(into_quiz).collect()
    }

    async fn recent_by_status(
        &self,
        status: QuizStatus,
        limit: i64,
    ) -> Result<Vec<Quiz>, AppError> {
        let sql = format!(
            "SELECT {} FROM quizzes WHERE status = $1 ORDER BY created_at DESC, id DESC LIMIT $2",
            QUIZ_COLUMNS
        );
        let rows = sqlx::query_as::<_, QuizRow>(&sql)
            .bind(status.as_str())
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(into_quiz).collect()
    }
}
