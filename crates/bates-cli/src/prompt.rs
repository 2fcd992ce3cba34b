//! Interactive path prompts.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Prompt for the mapping file path.
pub const MAPPING_PROMPT: &str = "Enter the path to the CSV file: ";

/// Prompt for the target directory path.
pub const DIRECTORY_PROMPT: &str = "Enter the path to the directory containing files: ";

/// Cleans a user-supplied path: strips surrounding whitespace and quote
/// characters (as left by drag-and-drop or "copy as path"), then converts
/// separators for the host platform.
pub fn normalize_input_path(raw: &str) -> PathBuf {
    let cleaned = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();
    PathBuf::from(host_separators(cleaned))
}

#[cfg(windows)]
fn host_separators(path: &str) -> String {
    path.replace('/', "\\")
}

#[cfg(not(windows))]
fn host_separators(path: &str) -> String {
    path.to_string()
}

/// Writes `prompt`, reads one line from `input`, and normalizes it.
///
/// # Errors
///
/// Returns an error if writing the prompt or reading the answer fails, or if
/// `input` is at end of file.
pub fn prompt_path<R, W>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<PathBuf>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no input provided",
        ));
    }
    Ok(normalize_input_path(&line))
}
