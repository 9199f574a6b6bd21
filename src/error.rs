// src/error.rs

use std::fmt;

/// Global Application Error Enum.
/// Centralizes the failure taxonomy of the generation pipeline: submission-time
/// errors are returned to the caller, while job-time errors are logged and
/// resolved into a terminal quiz status by the runner.
#[derive(Debug)]
pub enum AppError {
    /// Bad input shape or limits (file count, request fields, missing role).
    Validation(String),

    /// Staging or persistence I/O failed.
    Storage(String),

    /// A source document could not be read or produced no text.
    Extraction(String),

    /// Every configured text-generation provider failed or none is configured.
    /// Carries the last underlying provider error, if any.
    ProviderUnavailable(String),

    /// Model output could not be coerced into a valid question list.
    Parse(String),

    /// Quiz or staged upload does not exist.
    NotFound(String),

    /// Caller is not allowed to see or act on this quiz.
    Permission(String),

    /// Illegal lifecycle transition (e.g. rebuilding a quiz that is
    /// already generating).
    Conflict(String),

    /// Unexpected condition that has no more specific variant.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "validation error: {}", msg),
            AppError::Storage(msg) => write!(f, "storage error: {}", msg),
            AppError::Extraction(msg) => write!(f, "extraction error: {}", msg),
            AppError::ProviderUnavailable(msg) => write!(f, "provider unavailable: {}", msg),
            AppError::Parse(msg) => write!(f, "parse error: {}", msg),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::Permission(msg) => write!(f, "permission denied: {}", msg),
            AppError::Conflict(msg) => write!(f, "conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `sqlx::Error` into an `AppError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound(err.to_string()),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// File staging and extraction go through std I/O.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}
