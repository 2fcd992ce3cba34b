//! Run orchestration: report setup, mapping load, directory scan.

use std::path::{Path, PathBuf};

use bates_ingest::load_rename_map;
use bates_report::{FileSink, ReportLog, ReportSink, report_path};
use chrono::{DateTime, FixedOffset, Local};
use tracing::{debug, info, info_span, warn};

use crate::renamer::{RenameOutcome, rename_files};

/// Linear run state: `Idle -> LoadingMapping -> (Failed | MappingLoaded) ->
/// Scanning -> (Done | Failed)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    LoadingMapping,
    MappingLoaded,
    Scanning,
    Done,
    Failed,
}

/// Inputs of one run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub mapping_path: PathBuf,
    pub directory: PathBuf,
    /// Names the report file.
    pub started_at: DateTime<FixedOffset>,
}

impl RunRequest {
    /// Creates a request stamped with the current local time.
    pub fn new(mapping_path: impl Into<PathBuf>, directory: impl Into<PathBuf>) -> Self {
        Self {
            mapping_path: mapping_path.into(),
            directory: directory.into(),
            started_at: Local::now().fixed_offset(),
        }
    }

    #[must_use]
    pub fn with_started_at(mut self, started_at: DateTime<FixedOffset>) -> Self {
        self.started_at = started_at;
        self
    }
}

#[derive(Debug)]
pub struct RunResult {
    pub phase: RunPhase,
    /// Report file location, if it could be created.
    pub report_path: Option<PathBuf>,
    pub outcomes: Vec<RenameOutcome>,
}

impl RunResult {
    pub fn renamed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_renamed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn unmatched_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_unmatched()).count()
    }
}

/// Executes one run, writing every report line to `console` and to the
/// report file next to the mapping file.
///
/// Never fails: a mapping load failure or an unreadable directory ends the
/// run early in [`RunPhase::Failed`], and per-file failures are recorded in
/// the outcomes. The report is closed on every path.
pub fn run(request: &RunRequest, console: impl ReportSink + 'static) -> RunResult {
    let span = info_span!(
        "run",
        mapping = %request.mapping_path.display(),
        directory = %request.directory.display()
    );
    let _guard = span.enter();

    let mut log = ReportLog::new().with_sink(console);
    let report = open_report(request, &mut log);
    let mut result = RunResult {
        phase: RunPhase::Idle,
        report_path: report,
        outcomes: Vec::new(),
    };

    advance(&mut result, RunPhase::LoadingMapping);
    let map = match load_rename_map(&request.mapping_path) {
        Ok(map) => map,
        Err(error) => {
            log.line(format!("Error reading CSV file: {error}"));
            advance(&mut result, RunPhase::Failed);
            finish(log, result.report_path.as_deref());
            return result;
        }
    };
    info!(entries = map.len(), "mapping loaded");
    advance(&mut result, RunPhase::MappingLoaded);

    advance(&mut result, RunPhase::Scanning);
    match rename_files(&map, &request.directory, &mut log) {
        Ok(outcomes) => {
            result.outcomes = outcomes;
            advance(&mut result, RunPhase::Done);
        }
        Err(error) => {
            log.line(format!("Error reading directory: {error}"));
            advance(&mut result, RunPhase::Failed);
        }
    }

    info!(
        renamed = result.renamed_count(),
        failed = result.failed_count(),
        unmatched = result.unmatched_count(),
        "run finished"
    );
    finish(log, result.report_path.as_deref());
    result
}

fn open_report(request: &RunRequest, log: &mut ReportLog) -> Option<PathBuf> {
    let path = report_path(&request.mapping_path, &request.started_at);
    match FileSink::create(&path) {
        Ok(sink) => {
            debug!(report = %path.display(), "report file opened");
            log.push_sink(Box::new(sink));
            Some(path)
        }
        Err(error) => {
            warn!(%error, "continuing without a report file");
            log.line(error.to_string());
            None
        }
    }
}

fn advance(result: &mut RunResult, next: RunPhase) {
    debug!(from = ?result.phase, to = ?next, "run phase");
    result.phase = next;
}

fn finish(mut log: ReportLog, report: Option<&Path>) {
    match report {
        Some(path) => log.line(format!("Report saved to {}", path.display())),
        None => log.line("Report could not be saved"),
    }
    if let Err(error) = log.close() {
        warn!(%error, "failed to close report");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bates_report::MemorySink;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn started() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 15, 9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_request_with_started_at() {
        let request = RunRequest::new("index.csv", "files").with_started_at(started());
        assert_eq!(request.started_at, started());
        assert_eq!(request.mapping_path, PathBuf::from("index.csv"));
    }

    #[test]
    fn test_missing_mapping_fails_before_scan() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("ABC001.pdf"), "x").unwrap();
        let request = RunRequest::new(dir.path().join("index.csv"), dir.path())
            .with_started_at(started());
        let console = MemorySink::new();

        let result = run(&request, console.clone());

        assert_eq!(result.phase, RunPhase::Failed);
        assert!(result.outcomes.is_empty());
        assert!(dir.path().join("ABC001.pdf").exists());
        let lines = console.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Error reading CSV file: mapping file not found"));
        assert!(lines[1].starts_with("Report saved to "));
    }

    #[test]
    fn test_report_directory_missing_runs_console_only() {
        let dir = TempDir::new().unwrap();
        let request = RunRequest::new(dir.path().join("gone").join("index.csv"), dir.path())
            .with_started_at(started());
        let console = MemorySink::new();

        let result = run(&request, console.clone());

        assert!(result.report_path.is_none());
        let lines = console.lines();
        assert!(lines[0].starts_with("failed to create report file"));
        assert_eq!(lines.last().map(String::as_str), Some("Report could not be saved"));
    }
}
