// src/jobs/scheduler.rs

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::{Semaphore, mpsc};
use tracing::error;

use crate::error::AppError;
use crate::jobs::{JobContext, runner};
use crate::models::job::GenerationJob;

/// Explicit queue in front of a bounded worker pool.
///
/// `schedule` enqueues without blocking; a dispatcher task drains the queue
/// and runs each job in its own tokio task, with a semaphore capping how
/// many run at once. Once scheduled, a job always runs to a terminal quiz
/// status; there is no cancellation path.
#[derive(Clone)]
pub struct Scheduler {
    tx: mpsc::UnboundedSender<GenerationJob>,
}

impl Scheduler {
    /// Spawn the dispatcher with `workers` concurrent job slots.
    pub fn start(ctx: JobContext, workers: usize) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<GenerationJob>();
        let semaphore = Arc::new(Semaphore::new(workers.max(1)));

        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                let permit = match semaphore.clone().acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => break,
                };
                let ctx = ctx.clone();

                tokio::spawn(async move {
                    let _permit = permit;
                    let quiz_id = job.quiz_id;

                    // A panicking job must still resolve its quiz to a
                    // terminal status.
                    let outcome = AssertUnwindSafe(runner::run(&ctx, job)).catch_unwind().await;
                    if outcome.is_err() {
                        error!(quiz_id, "generation job panicked");
                        runner::force_draft(&ctx, quiz_id).await;
                    }
                });
            }
        });

        Self { tx }
    }

    /// Hand a job to the worker pool. Never blocks the caller.
    pub fn schedule(&self, job: GenerationJob) -> Result<(), AppError> {
        self.tx
            .send(job)
            .map_err(|_| AppError::Internal("generation queue is closed".to_string()))
    }
}
