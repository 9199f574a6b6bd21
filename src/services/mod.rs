// src/services/mod.rs

pub mod queries;
pub mod rebuild;
pub mod submission;

pub use rebuild::RebuildSelector;
pub use submission::SubmissionService;
