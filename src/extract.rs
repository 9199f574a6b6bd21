// src/extract.rs

use std::path::Path;

use lopdf::Document;

use crate::error::AppError;

/// Whether a staged file is recognized as a source document the extractor
/// can handle. Shared with the rebuild selector.
pub fn is_source_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Extract plain text from a PDF, page by page in page order, joined with a
/// blank line. A page that yields no text contributes an empty string; a
/// document that yields no non-whitespace text at all is an error, as is a
/// file that cannot be parsed.
pub fn pdf_text(path: &Path) -> Result<String, AppError> {
    let doc = Document::load(path).map_err(|e| {
        AppError::Extraction(format!("failed to read {}: {}", path.display(), e))
    })?;

    let mut pages = Vec::new();
    for (number, _) in doc.get_pages() {
        pages.push(doc.extract_text(&[number]).unwrap_or_default());
    }
    let text = pages.join("\n\n");

    if text.trim().is_empty() {
        return Err(AppError::Extraction(format!(
            "{} produced no extractable text",
            path.display()
        )));
    }
    Ok(text)
}
