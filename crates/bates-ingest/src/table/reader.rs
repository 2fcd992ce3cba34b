//! CSV reading for rename mappings.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use super::header::{column_index, normalize_cell, normalize_header};
use crate::error::{LoadError, Result};
use crate::mapping::{RenameMap, SOURCE_COLUMN, TARGET_COLUMN};

/// Field delimiter of a mapping file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
}

impl Delimiter {
    /// Picks the delimiter from the file extension (`.tsv` and `.tab` are
    /// tab-delimited, everything else is comma-delimited).
    pub fn for_path(path: &Path) -> Self {
        let is_tabular = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab"))
            .unwrap_or(false);
        if is_tabular { Self::Tab } else { Self::Comma }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
        }
    }
}

/// Loads the `Bates/Control #` to `Document ID` mapping from `path`.
///
/// Cells are trimmed of surrounding whitespace before use, so a key written
/// as `"ABC001 "` is stored as `ABC001` and matches `ABC001.pdf`, never
/// `ABC001 .pdf`. Base names are then compared to these trimmed keys exactly.
/// Rows with an empty key or replacement are skipped. When a key repeats,
/// the later row wins.
///
/// # Errors
///
/// Returns a [`LoadError`] when the file is missing, unreadable, empty,
/// malformed, or lacks either required column.
pub fn load_rename_map(path: &Path) -> Result<RenameMap> {
    let delimiter = Delimiter::for_path(path);
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| LoadError::from_csv(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::from_csv(path, e))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(LoadError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let source_idx = required_column(&headers, SOURCE_COLUMN, path)?;
    let target_idx = required_column(&headers, TARGET_COLUMN, path)?;

    let mut map = RenameMap::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record.map_err(|e| LoadError::from_csv(path, e))?;
        let line = record.position().map_or(0, csv::Position::line);
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let source = normalize_cell(record.get(source_idx).unwrap_or(""));
        let replacement = normalize_cell(record.get(target_idx).unwrap_or(""));
        if source.is_empty() || replacement.is_empty() {
            warn!(
                path = %path.display(),
                line,
                "skipping mapping row with an empty Bates/Control # or Document ID"
            );
            skipped += 1;
            continue;
        }
        if let Some(previous) = map.insert(source.clone(), replacement) {
            warn!(
                key = %source,
                previous = %previous,
                line,
                "duplicate Bates/Control #, later row wins"
            );
        }
    }

    debug!(
        path = %path.display(),
        ?delimiter,
        entries = map.len(),
        skipped,
        "loaded rename mapping"
    );
    Ok(map)
}

fn required_column(headers: &[String], column: &str, path: &Path) -> Result<usize> {
    column_index(headers, column).ok_or_else(|| LoadError::MissingColumn {
        column: column.to_string(),
        path: path.to_path_buf(),
    })
}
