use crate::error::{PopmarkError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Shape of an import file. Entries of `bookmarks` are kept as raw JSON and
/// persisted verbatim; `categories` is accepted but not consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportDocument {
    pub bookmarks: Vec<Value>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

/// Parse an import document
///
/// Fails with `ImportParse` when `text` is not JSON or has no `bookmarks`
/// array.
pub fn parse_import_document(text: &str) -> Result<ImportDocument> {
    serde_json::from_str(text).map_err(|e| PopmarkError::ImportParse(e.to_string()))
}

/// Read and parse an import file; unreadable files are import failures too
pub fn read_import_file(path: &Path) -> Result<ImportDocument> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| PopmarkError::ImportParse(format!("{}: {}", path.display(), e)))?;
    parse_import_document(&text)
}
