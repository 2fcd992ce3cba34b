//! File name decomposition.

/// A file name split into base name and extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileNameParts<'a> {
    pub base: &'a str,
    /// Extension including its leading dot, or empty.
    pub extension: &'a str,
}

/// Splits `name` at its last `.`.
///
/// Leading dots never start an extension, so `.profile` has none, while
/// `archive.tar.gz` splits into `archive.tar` and `.gz`.
pub fn split_file_name(name: &str) -> FileNameParts<'_> {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(pos) => {
            let (base, extension) = name.split_at(leading + pos);
            FileNameParts { base, extension }
        }
        None => FileNameParts {
            base: name,
            extension: "",
        },
    }
}
