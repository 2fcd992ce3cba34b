//! Mapping table reading.

mod header;
mod reader;

pub use header::normalize_header;
pub use reader::{Delimiter, load_rename_map};
