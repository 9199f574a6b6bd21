// src/jobs/mod.rs

pub mod runner;
pub mod scheduler;

use std::sync::Arc;

use crate::lifecycle::Lifecycle;
use crate::providers::ProviderChain;
use crate::store::QuizStore;

pub use scheduler::Scheduler;

/// Shared collaborators a generation job needs. Cheap to clone; one clone
/// travels into each spawned job task.
#[derive(Clone)]
pub struct JobContext {
    pub store: Arc<dyn QuizStore>,
    pub lifecycle: Lifecycle,
    pub providers: Arc<ProviderChain>,
}

impl JobContext {
    pub fn new(store: Arc<dyn QuizStore>, providers: Arc<ProviderChain>) -> Self {
        let lifecycle = Lifecycle::new(store.clone());
        Self {
            store,
            lifecycle,
            providers,
        }
    }
}
