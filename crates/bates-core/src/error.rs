//! Error types for directory renaming.

use std::path::PathBuf;
use thiserror::Error;

/// Per-file rename failure. Never fatal for the run.
#[derive(Debug, Error)]
pub enum RenameError {
    /// Something already exists under the target name; it is never replaced.
    #[error("target already exists: {target}")]
    TargetExists { target: String },

    /// The computed name would leave the directory or is not a plain file name.
    #[error("invalid target name: {target}")]
    InvalidTarget { target: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The target directory itself could not be listed.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
