//! Core renaming pipeline.
//!
//! Loads a Bates/Control # mapping, renames the matching files of a
//! directory in place, and records every action in a [`ReportLog`].
//!
//! [`ReportLog`]: bates_report::ReportLog

pub mod error;
pub mod names;
pub mod pipeline;
pub mod renamer;

pub use error::{RenameError, ScanError};
pub use names::{FileNameParts, split_file_name};
pub use pipeline::{RunPhase, RunRequest, RunResult, run};
pub use renamer::{RenameOutcome, rename_files};
