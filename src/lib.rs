// src/lib.rs

pub mod config;
pub mod error;
pub mod extract;
pub mod jobs;
pub mod lifecycle;
pub mod models;
pub mod parser;
pub mod prompt;
pub mod providers;
pub mod services;
pub mod staging;
pub mod store;
pub mod telemetry;

// Re-export specific items for convenience if needed
pub use config::Config;
pub use error::AppError;
pub use lifecycle::{Lifecycle, QuizStatus};
pub use services::{SubmissionService, queries};
