//! Plain-text export of both panels

use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;

const HEADER: &str = "Diff Result";
const DIVIDER: &str = "---";
const ORIGINAL_PLACEHOLDER: &str = "Text 1";
const MODIFIED_PLACEHOLDER: &str = "Text 2";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write export to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Both panel texts with their names, as shared through copy or download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffExport {
    pub original_name: Option<String>,
    pub modified_name: Option<String>,
    pub original: String,
    pub modified: String,
}

impl DiffExport {
    pub fn body(&self) -> String {
        format!(
            "{HEADER}\n\nOriginal: {}\nModified: {}\n\n{}\n\n{DIVIDER}\n\n{}",
            display_name(self.original_name.as_deref(), ORIGINAL_PLACEHOLDER),
            display_name(self.modified_name.as_deref(), MODIFIED_PLACEHOLDER),
            self.original,
            self.modified,
        )
    }

    /// Write the export into `dir` as `diff-<date>.txt` using today's UTC date.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        self.write_to_dir_on(dir, Utc::now().date_naive())
    }

    pub fn write_to_dir_on(
        &self,
        dir: impl AsRef<Path>,
        date: NaiveDate,
    ) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(export_file_name(date));
        std::fs::write(&path, self.body()).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Exported diff to {}", path.display());
        Ok(path)
    }
}

fn display_name<'a>(name: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match name {
        Some(name) if !name.is_empty() => name,
        _ => placeholder,
    }
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("diff-{}.txt", date.format("%Y-%m-%d"))
}
