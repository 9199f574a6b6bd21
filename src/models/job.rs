// src/models/job.rs

use std::path::PathBuf;

use serde::Serialize;

use crate::lifecycle::QuizStatus;

/// Generation parameters carried by a job, fixed at submission time.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub title: String,
    pub topic: Option<String>,
    pub difficulty: String,
    pub num_questions: usize,
    pub model_override: Option<String>,
}

/// One unit of asynchronous generation work tied to a quiz id.
/// Created by the submission service or the rebuild selector, consumed
/// exactly once by the job runner, then discarded.
#[derive(Debug, Clone)]
pub struct GenerationJob {
    pub quiz_id: i64,

    /// Staged source documents; only the first one feeds the model.
    pub files: Vec<PathBuf>,

    pub params: GenerationParams,
}

/// Returned to the caller as soon as a submission has been scheduled.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitReceipt {
    pub quiz_id: i64,
    pub status: QuizStatus,
}

/// Returned to the caller as soon as a rebuild has been scheduled.
/// `source_dir` surfaces which staging directory the selector guessed, so
/// callers can audit the recency heuristic.
#[derive(Debug, Clone, Serialize)]
pub struct RebuildReceipt {
    pub quiz_id: i64,
    pub status: QuizStatus,
    pub source_dir: PathBuf,
}
