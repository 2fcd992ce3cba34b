//! CLI library components for the Bates renamer.

pub mod logging;
pub mod prompt;
