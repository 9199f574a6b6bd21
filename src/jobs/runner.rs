// src/jobs/runner.rs

use tracing::{debug, error, info, warn};

use crate::extract;
use crate::jobs::JobContext;
use crate::lifecycle::QuizStatus;
use crate::models::job::GenerationJob;
use crate::parser;
use crate::prompt;

/// Execute one generation job to completion.
///
/// This function never returns an error: every failure path logs and leaves
/// the quiz in a terminal, queryable status (`draft` on failure, `ready` on
/// success). The only silent exit is an orphaned job whose quiz no longer
/// exists.
pub async fn run(ctx: &JobContext, job: GenerationJob) {
    let quiz_id = job.quiz_id;

    match ctx.store.quiz_by_id(quiz_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!(quiz_id, "quiz vanished before generation started; dropping job");
            return;
        }
        Err(e) => {
            error!(quiz_id, error = %e, "could not load quiz; dropping job");
            return;
        }
    }

    if job.files.is_empty() {
        warn!(quiz_id, "job carries no staged files");
        force_draft(ctx, quiz_id).await;
        return;
    }

    // Only the first staged file feeds the model; the rest of the set is
    // kept for rebuilds.
    let source = match extract::pdf_text(&job.files[0]) {
        Ok(text) => text,
        Err(e) => {
            error!(quiz_id, stage = "extract", error = %e, "generation failed");
            force_draft(ctx, quiz_id).await;
            return;
        }
    };

    let task_prompt = prompt::user_prompt(&job.params, Some(&source));
    let raw = match ctx
        .providers
        .generate(
            prompt::SYSTEM_PROMPT,
            &task_prompt,
            job.params.model_override.as_deref(),
        )
        .await
    {
        Ok(raw) => raw,
        Err(e) => {
            error!(quiz_id, stage = "provider", error = %e, "generation failed");
            force_draft(ctx, quiz_id).await;
            return;
        }
    };

    let drafts = match parser::parse_questions(&raw, job.params.num_questions) {
        Ok(drafts) => drafts,
        Err(e) => {
            error!(quiz_id, stage = "parse", error = %e, "generation failed");
            force_draft(ctx, quiz_id).await;
            return;
        }
    };

    let mut saved = 0usize;
    for draft in &drafts {
        if draft.text.is_empty() {
            debug!(quiz_id, "skipping generated item with empty text");
            continue;
        }
        match ctx.store.insert_question(quiz_id, draft, true).await {
            Ok(_) => saved += 1,
            Err(e) => warn!(quiz_id, error = %e, "failed to persist one generated question"),
        }
    }

    // An empty batch still counts as a finished generation; the quiz becomes
    // a (degenerate) ready quiz rather than bouncing back to draft.
    match ctx.lifecycle.transition(quiz_id, QuizStatus::Ready).await {
        Ok(()) => info!(quiz_id, saved, "quiz generation finished"),
        Err(e) => error!(quiz_id, error = %e, "failed to finalize quiz status"),
    }
}

/// Failure path: resolve the quiz back to `draft` so it never sits in
/// `generating` forever. Also used by the scheduler when a job panics.
pub(crate) async fn force_draft(ctx: &JobContext, quiz_id: i64) {
    if let Err(e) = ctx.lifecycle.transition(quiz_id, QuizStatus::Draft).await {
        error!(quiz_id, error = %e, "failed to mark quiz back as draft");
    }
}
