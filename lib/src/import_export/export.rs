use crate::error::Result;
use crate::grouping;
use crate::models::bookmark::Bookmark;
use crate::models::category::Category;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of an export file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub bookmarks: Vec<Bookmark>,
    pub categories: Vec<String>,
}

impl ExportDocument {
    /// Flatten a grouped view in display order
    pub fn from_categories(categories: &[Category]) -> Self {
        Self {
            bookmarks: grouping::flatten(categories),
            categories: grouping::category_names(categories),
        }
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `bookmarks-<YYYY-MM-DD>.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("bookmarks-{}.json", date.format("%Y-%m-%d"))
}

/// Write `document` into `dir` under the dated file name and return its path
pub fn write_export(document: &ExportDocument, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(date));
    fs::write(&path, document.to_pretty_json()?)?;
    log::info!("Exported {} bookmark(s) to {}", document.bookmarks.len(), path.display());
    Ok(path)
}
