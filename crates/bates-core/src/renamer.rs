//! Directory renamer.
//!
//! Each regular file whose base name is a mapping key is renamed to the
//! mapped Document ID plus its original extension. Renames happen one at a
//! time; a failure is recorded and the scan moves on.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bates_ingest::RenameMap;
use bates_report::ReportLog;
use tracing::debug;

use crate::error::{RenameError, ScanError};
use crate::names::split_file_name;

/// What happened to one directory entry.
#[derive(Debug)]
pub enum RenameOutcome {
    Renamed {
        from: String,
        to: String,
    },
    Failed {
        from: String,
        to: String,
        error: RenameError,
    },
    Unmatched {
        name: String,
    },
    /// The directory listing yielded an entry that could not be read.
    Unreadable {
        error: io::Error,
    },
}

impl RenameOutcome {
    pub fn is_renamed(&self) -> bool {
        matches!(self, Self::Renamed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::Unreadable { .. })
    }

    pub fn is_unmatched(&self) -> bool {
        matches!(self, Self::Unmatched { .. })
    }
}

/// One report line per outcome.
impl fmt::Display for RenameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Renamed { from, to } => write!(f, "Renamed: {from} -> {to}"),
            Self::Failed { from, error, .. } => write!(f, "Failed to rename {from}: {error}"),
            Self::Unmatched { name } => write!(f, "No match found in CSV for file: {name}"),
            Self::Unreadable { error } => write!(f, "Failed to read directory entry: {error}"),
        }
    }
}

/// Renames the files of `directory` according to `map`, logging one line
/// per regular file to `log`.
///
/// The listing is taken before the first rename, so renamed files are not
/// visited again. Entries are processed in file system enumeration order,
/// which is unsorted and differs between platforms.
///
/// # Errors
///
/// Returns a [`ScanError`] only when the directory itself cannot be listed.
pub fn rename_files(
    map: &RenameMap,
    directory: &Path,
    log: &mut ReportLog,
) -> Result<Vec<RenameOutcome>, ScanError> {
    let entries = snapshot_entries(directory)?;
    debug!(entries = entries.len(), "directory listing taken");

    let mut outcomes = Vec::with_capacity(entries.len());
    for entry in entries {
        let outcome = match entry {
            Ok(path) => {
                if !path.is_file() {
                    debug!(path = %path.display(), "skipping non-file entry");
                    continue;
                }
                rename_entry(map, directory, &path)
            }
            Err(error) => RenameOutcome::Unreadable { error },
        };
        log.line(outcome.to_string());
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

fn snapshot_entries(directory: &Path) -> Result<Vec<io::Result<PathBuf>>, ScanError> {
    match fs::metadata(directory) {
        Ok(metadata) if !metadata.is_dir() => {
            return Err(ScanError::NotADirectory {
                path: directory.to_path_buf(),
            });
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Err(ScanError::DirectoryNotFound {
                path: directory.to_path_buf(),
            });
        }
        // Other stat failures surface through read_dir below.
        _ => {}
    }
    let entries = fs::read_dir(directory).map_err(|source| ScanError::DirectoryRead {
        path: directory.to_path_buf(),
        source,
    })?;
    Ok(entries
        .map(|entry| entry.map(|entry| entry.path()))
        .collect())
}

fn rename_entry(map: &RenameMap, directory: &Path, path: &Path) -> RenameOutcome {
    let Some(file_name) = path.file_name() else {
        return RenameOutcome::Unmatched {
            name: path.display().to_string(),
        };
    };
    // Mapping keys are UTF-8, so a non-UTF-8 name can never match.
    let Some(name) = file_name.to_str() else {
        return RenameOutcome::Unmatched {
            name: file_name.to_string_lossy().into_owned(),
        };
    };

    let parts = split_file_name(name);
    let Some(replacement) = map.get(parts.base) else {
        debug!(file = name, "no mapping entry");
        return RenameOutcome::Unmatched {
            name: name.to_string(),
        };
    };

    let new_name = format!("{replacement}{}", parts.extension);
    let result = if new_name == name {
        Ok(())
    } else {
        move_file(path, directory, &new_name)
    };
    match result {
        Ok(()) => {
            debug!(from = name, to = %new_name, "renamed");
            RenameOutcome::Renamed {
                from: name.to_string(),
                to: new_name,
            }
        }
        Err(error) => {
            debug!(from = name, to = %new_name, %error, "rename failed");
            RenameOutcome::Failed {
                from: name.to_string(),
                to: new_name,
                error,
            }
        }
    }
}

fn move_file(source: &Path, directory: &Path, new_name: &str) -> Result<(), RenameError> {
    if !is_plain_file_name(new_name) {
        return Err(RenameError::InvalidTarget {
            target: new_name.to_string(),
        });
    }
    let target = directory.join(new_name);
    // fs::rename silently replaces an existing target on Unix.
    match fs::symlink_metadata(&target) {
        Ok(_) => {
            return Err(RenameError::TargetExists {
                target: new_name.to_string(),
            });
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => return Err(error.into()),
    }
    fs::rename(source, &target)?;
    Ok(())
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use bates_report::MemorySink;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), name).unwrap();
    }

    fn exists(dir: &TempDir, name: &str) -> bool {
        dir.path().join(name).exists()
    }

    #[test]
    fn test_rename_matched_keeps_extension() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "ABC001.pdf");
        let map: RenameMap = [("ABC001", "DOC100")].into_iter().collect();
        let mut log = ReportLog::new();

        let outcomes = rename_files(&map, dir.path(), &mut log).unwrap();

        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_renamed());
        assert!(exists(&dir, "DOC100.pdf"));
        assert!(!exists(&dir, "ABC001.pdf"));
    }

    #[test]
    fn test_unmatched_left_alone() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "XYZ999.pdf");
        let map: RenameMap = [("ABC001", "DOC100")].into_iter().collect();
        let memory = MemorySink::new();
        let mut log = ReportLog::new().with_sink(memory.clone());

        let outcomes = rename_files(&map, dir.path(), &mut log).unwrap();

        assert!(outcomes[0].is_unmatched());
        assert!(exists(&dir, "XYZ999.pdf"));
        assert_eq!(
            memory.lines(),
            vec!["No match found in CSV for file: XYZ999.pdf".to_string()]
        );
    }

    #[test]
    fn test_full_name_with_extension_does_not_match() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "ABC001.pdf");
        let map: RenameMap = [("ABC001.pdf", "DOC100")].into_iter().collect();
        let mut log = ReportLog::new();

        let outcomes = rename_files(&map, dir.path(), &mut log).unwrap();

        assert!(outcomes[0].is_unmatched());
        assert!(exists(&dir, "ABC001.pdf"));
    }

    #[test]
    fn test_subdirectories_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("ABC001")).unwrap();
        let map: RenameMap = [("ABC001", "DOC100")].into_iter().collect();
        let memory = MemorySink::new();
        let mut log = ReportLog::new().with_sink(memory.clone());

        let outcomes = rename_files(&map, dir.path(), &mut log).unwrap();

        assert!(outcomes.is_empty());
        assert!(memory.lines().is_empty());
        assert!(dir.path().join("ABC001").is_dir());
    }

    #[test]
    fn test_collision_with_existing_file_fails() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "ABC001.pdf");
        touch(&dir, "DOC100.pdf");
        let map: RenameMap = [("ABC001", "DOC100")].into_iter().collect();
        let memory = MemorySink::new();
        let mut log = ReportLog::new().with_sink(memory.clone());

        let outcomes = rename_files(&map, dir.path(), &mut log).unwrap();

        let failed: Vec<_> = outcomes.iter().filter(|o| o.is_failed()).collect();
        assert_eq!(failed.len(), 1);
        assert!(matches!(
            failed[0],
            RenameOutcome::Failed {
                error: RenameError::TargetExists { .. },
                ..
            }
        ));
        assert!(memory.lines().contains(
            &"Failed to rename ABC001.pdf: target already exists: DOC100.pdf".to_string()
        ));
        assert_eq!(fs::read_to_string(dir.path().join("DOC100.pdf")).unwrap(), "DOC100.pdf");
        assert!(exists(&dir, "ABC001.pdf"));
    }

    #[test]
    fn test_two_sources_same_target_only_first_wins() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "ABC001.pdf");
        touch(&dir, "ABC002.pdf");
        let map: RenameMap = [("ABC001", "DOC100"), ("ABC002", "DOC100")]
            .into_iter()
            .collect();
        let mut log = ReportLog::new();

        let outcomes = rename_files(&map, dir.path(), &mut log).unwrap();

        assert_eq!(outcomes.iter().filter(|o| o.is_renamed()).count(), 1);
        assert_eq!(outcomes.iter().filter(|o| o.is_failed()).count(), 1);
        assert!(exists(&dir, "DOC100.pdf"));
    }

    #[test]
    fn test_target_escaping_directory_rejected() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "ABC001.pdf");
        let map: RenameMap = [("ABC001", "../DOC100")].into_iter().collect();
        let mut log = ReportLog::new();

        let outcomes = rename_files(&map, dir.path(), &mut log).unwrap();

        assert!(matches!(
            outcomes[0],
            RenameOutcome::Failed {
                error: RenameError::InvalidTarget { .. },
                ..
            }
        ));
        assert!(exists(&dir, "ABC001.pdf"));
    }

    #[test]
    fn test_identity_mapping_is_noop() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "DOC100.pdf");
        let map: RenameMap = [("DOC100", "DOC100")].into_iter().collect();
        let mut log = ReportLog::new();

        let outcomes = rename_files(&map, dir.path(), &mut log).unwrap();

        assert!(outcomes[0].is_renamed());
        assert_eq!(outcomes[0].to_string(), "Renamed: DOC100.pdf -> DOC100.pdf");
        assert!(exists(&dir, "DOC100.pdf"));
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let map = RenameMap::new();
        let mut log = ReportLog::new();

        let result = rename_files(&map, &dir.path().join("absent"), &mut log);

        assert!(matches!(result, Err(ScanError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_regular_file_is_not_a_directory() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "index.csv");
        let map = RenameMap::new();
        let mut log = ReportLog::new();

        let result = rename_files(&map, &dir.path().join("index.csv"), &mut log);

        let err = result.unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
        assert!(err.to_string().starts_with("not a directory: "));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_name_reported_unmatched() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let raw = OsStr::from_bytes(b"ABC\xff001.pdf");
        fs::write(dir.path().join(raw), "x").unwrap();
        touch(&dir, "ABC002.pdf");
        let map: RenameMap = [("ABC001", "DOC100"), ("ABC002", "DOC101")]
            .into_iter()
            .collect();
        let memory = MemorySink::new();
        let mut log = ReportLog::new().with_sink(memory.clone());

        let outcomes = rename_files(&map, dir.path(), &mut log).unwrap();

        assert_eq!(outcomes.len(), 2);
        let lines = memory.lines();
        assert!(
            lines.contains(&"No match found in CSV for file: ABC\u{fffd}001.pdf".to_string())
        );
        assert!(lines.contains(&"Renamed: ABC002.pdf -> DOC101.pdf".to_string()));
        assert!(dir.path().join(raw).exists());
        assert!(exists(&dir, "DOC101.pdf"));
    }

    #[cfg(unix)]
    #[test]
    fn test_os_rename_failure_is_logged_and_scan_continues() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "ABC001.pdf");
        touch(&dir, "ABC002.pdf");
        let too_long = "D".repeat(300);
        let map: RenameMap = [("ABC001", too_long.as_str()), ("ABC002", "DOC101")]
            .into_iter()
            .collect();
        let memory = MemorySink::new();
        let mut log = ReportLog::new().with_sink(memory.clone());

        let outcomes = rename_files(&map, dir.path(), &mut log).unwrap();

        assert!(outcomes.iter().any(|outcome| matches!(
            outcome,
            RenameOutcome::Failed {
                error: RenameError::Io(_),
                ..
            }
        )));
        let lines = memory.lines();
        assert!(
            lines
                .iter()
                .any(|line| line.starts_with("Failed to rename ABC001.pdf: "))
        );
        assert!(lines.contains(&"Renamed: ABC002.pdf -> DOC101.pdf".to_string()));
        assert!(exists(&dir, "ABC001.pdf"));
        assert!(exists(&dir, "DOC101.pdf"));
    }

    #[test]
    fn test_is_plain_file_name() {
        assert!(is_plain_file_name("DOC100.pdf"));
        assert!(is_plain_file_name(".pdf"));
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("sub/DOC100.pdf"));
        assert!(!is_plain_file_name("sub\\DOC100.pdf"));
    }
}
