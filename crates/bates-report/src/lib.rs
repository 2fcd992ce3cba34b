//! Report output for Bates renaming runs.
//!
//! A [`ReportLog`] fans every message out to an ordered list of
//! [`ReportSink`]s, typically the console and a timestamped report file
//! written next to the mapping file.

pub mod error;
pub mod log;
pub mod naming;
pub mod sink;

pub use error::ReportError;
pub use log::ReportLog;
pub use naming::{REPORT_SUFFIX, format_timestamp, format_utc_offset, report_file_name, report_path};
pub use sink::{ConsoleSink, FileSink, MemorySink, ReportSink};
