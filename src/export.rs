//! Backup export of the Content Store.
//!
//! The export is the store re-serialized as pretty JSON in the persisted
//! format, so a backup can be dropped back in as `metadata.json` unchanged.

use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::content::ContentStore;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize the whole store as indented JSON.
pub fn export_json(store: &ContentStore) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(store)?)
}

/// `<prefix>-YYYY-MM-DD.json`
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}.json", date.format("%Y-%m-%d"))
}

/// Write the export into `dir` and return the written path.
pub fn write_export(
    store: &ContentStore,
    dir: &Path,
    prefix: &str,
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let json = export_json(store)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(prefix, date));
    fs::write(&path, json)?;
    Ok(path)
}
