//! Mapping ingestion for Bates renaming.
//!
//! This crate reads the lookup table that pairs each `Bates/Control #` with
//! the `Document ID` it should be renamed to, and turns it into a
//! [`RenameMap`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use bates_ingest::load_rename_map;
//!
//! let map = load_rename_map(Path::new("production/index.csv"))?;
//! assert_eq!(map.get("ABC001"), Some("DOC100"));
//! ```

mod error;
mod mapping;
mod table;

// === Error Types ===
pub use error::{LoadError, Result};

// === CSV Reading ===
pub use table::{Delimiter, load_rename_map, normalize_header};

// === Mapping ===
pub use mapping::{RenameMap, SOURCE_COLUMN, TARGET_COLUMN};
