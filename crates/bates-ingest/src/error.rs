//! Error types for mapping ingestion.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a rename mapping.
#[derive(Debug, Error)]
pub enum LoadError {
    // === File System Errors ===
    /// Mapping file not found.
    #[error("mapping file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the mapping file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse a CSV record.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file is empty (no header row).
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Required column not found in the header row.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },
}

impl LoadError {
    /// Maps a `csv` crate error for `path`, keeping I/O failures distinct.
    pub(crate) fn from_csv(path: &Path, err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Self::FileNotFound {
                    path: path.to_path_buf(),
                }
            }
            csv::ErrorKind::Io(source) => Self::FileRead {
                path: path.to_path_buf(),
                source,
            },
            _ => Self::CsvParse {
                path: path.to_path_buf(),
                message,
            },
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoadError::MissingColumn {
            column: "Document ID".to_string(),
            path: PathBuf::from("/path/to/index.csv"),
        };
        assert_eq!(
            err.to_string(),
            "required column 'Document ID' not found in /path/to/index.csv"
        );
    }

    #[test]
    fn test_error_display_not_found() {
        let err = LoadError::FileNotFound {
            path: PathBuf::from("/path/to/index.csv"),
        };
        assert_eq!(err.to_string(), "mapping file not found: /path/to/index.csv");
    }
}
