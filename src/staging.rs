// src/staging.rs

use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use crate::error::AppError;
use crate::models::creator::Creator;

/// An uploaded source document as handed over by the request layer.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub data: Vec<u8>,
}

/// Copies uploads into per-submission staging directories that the
/// background job (or a later rebuild) reads from.
///
/// Layout: `<root>/creator_<id>/<submission-token>/<file>`. Staged files are
/// never mutated; retention is an operational concern outside the core.
#[derive(Debug, Clone)]
pub struct FileStaging {
    root: PathBuf,
}

impl FileStaging {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// All staging directories of one creator live under this path.
    pub fn creator_dir(&self, creator_id: i64) -> PathBuf {
        self.root.join(format!("creator_{}", creator_id))
    }

    /// Stage one submission: a fresh directory keyed by a random token,
    /// holding a sanitized copy of every upload. Returns the staged paths in
    /// upload order.
    pub fn stage(&self, creator: &Creator, files: &[UploadedFile]) -> Result<Vec<PathBuf>, AppError> {
        let token = Uuid::new_v4().simple().to_string();
        let dir = self.creator_dir(creator.id).join(token);
        fs::create_dir_all(&dir)?;

        let mut staged = Vec::with_capacity(files.len());
        for file in files {
            let dest = dir.join(sanitize_file_name(&file.name));
            fs::write(&dest, &file.data)?;
            staged.push(dest);
        }
        tracing::debug!(creator_id = creator.id, count = staged.len(), dir = %dir.display(), "staged uploads");
        Ok(staged)
    }
}

/// Reduce an upload name to a safe single path component: strip any
/// directory prefix the client sent and neutralize `..` sequences.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned = base.replace("..", "_");
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
