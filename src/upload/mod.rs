//! Loading panel text from files
//!
//! Files are checked against the configured size cap and extension
//! allow-list before their content is read. Nothing here touches a session,
//! so a rejected file leaves the current texts as they were.

use crate::config::UploadConfig;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Byte count displayed with [`format_file_size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileSize(pub u64);

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_file_size(self.0))
    }
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("File size ({size}) exceeds maximum allowed size ({max})")]
    TooLarge { size: FileSize, max: FileSize },
    #[error("File type not supported: {}. Please upload a text file.", .path.display())]
    UnsupportedExtension { path: PathBuf },
    #[error("File is not valid UTF-8 text: {}", .path.display())]
    NotUtf8 { path: PathBuf },
    #[error("Failed to read file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Text loaded from disk, ready to be placed in a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub name: String,
    pub content: String,
    pub size: u64,
}

pub fn load_file(path: impl AsRef<Path>, policy: &UploadConfig) -> Result<LoadedFile, UploadError> {
    let path = path.as_ref();
    let io_error = |source| UploadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_error)?.len();
    if size > policy.max_file_size {
        return Err(UploadError::TooLarge {
            size: FileSize(size),
            max: FileSize(policy.max_file_size),
        });
    }

    let accepted = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| policy.accepts_extension(e));
    if !accepted {
        return Err(UploadError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(io_error)?;
    let content = String::from_utf8(bytes).map_err(|_| UploadError::NotUtf8 {
        path: path.to_path_buf(),
    })?;
    let content = match content.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    tracing::info!("Loaded {} ({})", name, FileSize(size));
    Ok(LoadedFile {
        name,
        content,
        size,
    })
}

/// Human-readable size such as `"1.5 KB"`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{:.2}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", text, UNITS[unit])
}
