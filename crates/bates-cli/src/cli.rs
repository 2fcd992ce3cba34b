//! CLI argument definitions for the Bates renamer.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "bates-rename",
    version,
    about = "Rename files from Bates/Control # to Document ID",
    long_about = "Rename the files of a directory whose base name is a Bates/Control #\n\
                  to the matching Document ID from a CSV mapping file.\n\n\
                  Paths that are not given as arguments are prompted for.\n\
                  A timestamped report is written next to the mapping file."
)]
pub struct Cli {
    /// Mapping CSV with 'Bates/Control #' and 'Document ID' columns.
    #[arg(value_name = "MAPPING_FILE")]
    pub mapping_file: Option<String>,

    /// Directory containing the files to rename.
    #[arg(value_name = "DIRECTORY")]
    pub directory: Option<String>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Prefix log lines with timestamps (pretty and compact formats).
    #[arg(long = "log-timestamps")]
    pub log_timestamps: bool,

    /// Include the emitting module path in log lines.
    #[arg(long = "log-target")]
    pub log_target: bool,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
