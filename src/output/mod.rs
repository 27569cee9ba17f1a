//! Output formatting module
//!
//! Provides various output formats for run verdicts.

mod formatter;

pub use formatter::{OutputFormat, VerdictFormatter};
