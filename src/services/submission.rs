// src/services/submission.rs

use std::sync::Arc;

use tracing::{error, info};
use validator::Validate;

use crate::config::Config;
use crate::error::AppError;
use crate::jobs::Scheduler;
use crate::lifecycle::{Lifecycle, QuizStatus};
use crate::models::creator::{Creator, Role};
use crate::models::job::{GenerationJob, GenerationParams, RebuildReceipt, SubmitReceipt};
use crate::models::quiz::SubmitRequest;
use crate::services::rebuild::RebuildSelector;
use crate::staging::{FileStaging, UploadedFile};
use crate::store::{NewQuiz, QuizStore};

/// At most this many source documents per submission.
pub const MAX_UPLOAD_FILES: usize = 10;

/// Validates creation requests, stages uploads, creates the quiz row and
/// hands the generation job to the scheduler. Also the entry point for
/// rebuilds. Returns as soon as the job is queued; generation itself runs on
/// the worker pool.
pub struct SubmissionService {
    store: Arc<dyn QuizStore>,
    lifecycle: Lifecycle,
    staging: FileStaging,
    selector: RebuildSelector,
    scheduler: Scheduler,
    default_question_count: usize,
    rebuild_question_count: usize,
}

impl SubmissionService {
    pub fn new(config: &Config, store: Arc<dyn QuizStore>, scheduler: Scheduler) -> Self {
        let staging = FileStaging::new(&config.uploads_root);
        Self {
            lifecycle: Lifecycle::new(store.clone()),
            store,
            selector: RebuildSelector::new(staging.clone()),
            staging,
            scheduler,
            default_question_count: config.default_question_count,
            rebuild_question_count: config.rebuild_question_count,
        }
    }

    /// Accept a creation request and schedule generation.
    ///
    /// All checks run before any quiz row or staged file exists. If staging
    /// fails after the row was created, the quiz is forced back to `draft`
    /// and the storage error is surfaced to the caller.
    pub async fn submit(
        &self,
        creator: &Creator,
        request: SubmitRequest,
        files: Vec<UploadedFile>,
    ) -> Result<SubmitReceipt, AppError> {
        if creator.role != Role::Teacher {
            return Err(AppError::Validation(
                "teacher role is required to create quizzes".to_string(),
            ));
        }
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if files.is_empty() {
            return Err(AppError::Validation("no files uploaded".to_string()));
        }
        if files.len() > MAX_UPLOAD_FILES {
            return Err(AppError::Validation(format!(
                "too many files, max allowed is {}",
                MAX_UPLOAD_FILES
            )));
        }

        let difficulty = request
            .difficulty
            .clone()
            .unwrap_or_else(|| "any".to_string());

        let quiz = self
            .store
            .create_quiz(NewQuiz {
                creator_id: creator.id,
                title: request.title.clone(),
                topic: request.topic.clone(),
                description: Some("AI-generated from uploaded file(s)".to_string()),
                difficulty: difficulty.clone(),
                status: QuizStatus::Generating,
            })
            .await?;

        let staged = match self.staging.stage(creator, &files) {
            Ok(paths) => paths,
            Err(e) => {
                // The row already exists; it must not stay stuck in generating.
                self.revert_to_draft(quiz.id).await;
                return Err(e);
            }
        };

        let job = GenerationJob {
            quiz_id: quiz.id,
            files: staged,
            params: GenerationParams {
                title: request.title,
                topic: request.topic,
                difficulty,
                num_questions: request
                    .num_questions
                    .map(|n| n as usize)
                    .unwrap_or(self.default_question_count),
                model_override: request.model,
            },
        };
        if let Err(e) = self.scheduler.schedule(job) {
            self.revert_to_draft(quiz.id).await;
            return Err(e);
        }

        info!(quiz_id = quiz.id, creator_id = creator.id, "quiz submitted for generation");
        Ok(SubmitReceipt {
            quiz_id: quiz.id,
            status: QuizStatus::Generating,
        })
    }

    /// Re-run generation for an existing quiz from its creator's most recent
    /// staged uploads.
    ///
    /// Fails with `NotFound` when the quiz or any staged source is missing,
    /// `Permission` when the caller is neither a teacher nor the owner, and
    /// `Conflict` when a generation is already in flight (the lifecycle
    /// table has no generating-to-generating edge).
    pub async fn rebuild(
        &self,
        quiz_id: i64,
        caller: &Creator,
    ) -> Result<RebuildReceipt, AppError> {
        let quiz = self
            .store
            .quiz_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("quiz {} not found", quiz_id)))?;

        if caller.role != Role::Teacher && quiz.creator_id != caller.id {
            return Err(AppError::Permission(
                "not authorized to rebuild this quiz".to_string(),
            ));
        }

        let selected = self.selector.select(quiz.creator_id)?;

        self.lifecycle
            .transition(quiz_id, QuizStatus::Generating)
            .await?;

        let job = GenerationJob {
            quiz_id,
            files: selected.files,
            params: GenerationParams {
                title: quiz.title,
                topic: quiz.topic,
                difficulty: quiz.difficulty,
                num_questions: self.rebuild_question_count,
                model_override: None,
            },
        };
        if let Err(e) = self.scheduler.schedule(job) {
            self.revert_to_draft(quiz_id).await;
            return Err(e);
        }

        info!(quiz_id, source_dir = %selected.dir.display(), "quiz rebuild scheduled");
        Ok(RebuildReceipt {
            quiz_id,
            status: QuizStatus::Generating,
            source_dir: selected.dir,
        })
    }

    async fn revert_to_draft(&self, quiz_id: i64) {
        if let Err(revert) = self.lifecycle.transition(quiz_id, QuizStatus::Draft).await {
            error!(quiz_id, error = %revert, "failed to revert quiz to draft");
        }
    }
}
