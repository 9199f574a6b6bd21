// src/services/rebuild.rs

use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::error::AppError;
use crate::extract;
use crate::staging::FileStaging;

/// A staging directory picked for a rebuild, with the source documents it
/// holds (sorted by name for deterministic job input).
#[derive(Debug, Clone)]
pub struct SelectedSources {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Locates previously staged files for a creator when a rebuild is requested
/// without new uploads.
///
/// This is a recency heuristic: directories are scanned newest-first by
/// modification time and the first one containing at least one recognized
/// source document wins. Nothing verifies the files actually belong to the
/// quiz being rebuilt.
#[derive(Debug, Clone)]
pub struct RebuildSelector {
    staging: FileStaging,
}

impl RebuildSelector {
    pub fn new(staging: FileStaging) -> Self {
        Self { staging }
    }

    pub fn select(&self, creator_id: i64) -> Result<SelectedSources, AppError> {
        let creator_dir = self.staging.creator_dir(creator_id);
        if !creator_dir.is_dir() {
            return Err(AppError::NotFound(format!(
                "no uploads found for creator {}",
                creator_id
            )));
        }

        let mut candidates: Vec<(SystemTime, PathBuf)> = Vec::new();
        for entry in fs::read_dir(&creator_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            candidates.push((modified, path));
        }
        candidates.sort_by(|a, b| b.0.cmp(&a.0));

        for (_, dir) in candidates {
            let mut sources: Vec<PathBuf> = fs::read_dir(&dir)?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_file() && extract::is_source_document(path))
                .collect();
            if sources.is_empty() {
                continue;
            }
            sources.sort();
            return Ok(SelectedSources { dir, files: sources });
        }

        Err(AppError::NotFound(format!(
            "no staged source documents found for creator {}",
            creator_id
        )))
    }
}
