//! Report file naming.
//!
//! Reports are named `{YYYYMMDDTHHMM}_{UTC offset}_{mapping stem}_RenameReport.txt`
//! and live in the mapping file's directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};

/// Suffix appended to every report file name.
pub const REPORT_SUFFIX: &str = "_RenameReport.txt";

/// Local wall-clock timestamp to the minute, e.g. `20240115T0930`.
pub fn format_timestamp(at: &DateTime<FixedOffset>) -> String {
    at.format("%Y%m%dT%H%M").to_string()
}

/// Formats an offset as `UTC` + sign + two-digit hours, with two minute
/// digits appended only for offsets that are not whole hours.
///
/// `+00:00` is `UTC+00`, `-05:00` is `UTC-05`, `+05:30` is `UTC+0530`.
pub fn format_utc_offset(offset: FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let total_minutes = seconds.unsigned_abs() / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if minutes == 0 {
        format!("UTC{sign}{hours:02}")
    } else {
        format!("UTC{sign}{hours:02}{minutes:02}")
    }
}

/// Builds the report file name for a run against `mapping_path` started at `at`.
pub fn report_file_name(mapping_path: &Path, at: &DateTime<FixedOffset>) -> String {
    let stem = mapping_path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_else(|| "mapping".into());
    format!(
        "{}_{}_{}{REPORT_SUFFIX}",
        format_timestamp(at),
        format_utc_offset(*at.offset()),
        stem
    )
}

/// Full report path: the report file name inside the mapping file's directory.
pub fn report_path(mapping_path: &Path, at: &DateTime<FixedOffset>) -> PathBuf {
    let dir = mapping_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    dir.join(report_file_name(mapping_path, at))
}
