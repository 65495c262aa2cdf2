//! Budgeted, line-by-line reading of JSON Lines sources.
//!
//! Every line of a source is charged against a [`MemoryBudget`] before it is
//! decoded, so an oversized source is rejected incrementally instead of after
//! the whole file has been pulled into memory. Decoded lines are handed to a
//! caller-supplied visitor as JSON objects; what happens to them (indexing,
//! filtering) is up to the caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod budget;
pub mod error;
pub mod reader;
pub mod scan;
pub mod warning;

pub use budget::{DEFAULT_MEMORY_LIMIT, MemoryBudget};
pub use error::{Error, Result};
pub use reader::{JsonlReader, Line};
pub use scan::{DecodePolicy, Object, ScanOptions, ScanSummary, scan_file, scan_objects};
pub use warning::Warning;
