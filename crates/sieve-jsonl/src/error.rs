//! Error types for sieve-jsonl operations.

use std::io;
use thiserror::Error;

/// The error type for sieve-jsonl operations.
///
/// Every variant is fatal for the pass that produced it.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while opening or reading the source.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A line could not be decoded as a JSON object.
    #[error("line {line_number}: malformed JSON: {source}")]
    Decode {
        /// The 1-based line number of the offending line.
        line_number: usize,
        /// The underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The bytes read in this pass went over the configured ceiling.
    #[error(
        "memory limit of {limit} bytes exceeded at line {line_number} ({consumed} bytes read)"
    )]
    MemoryLimitExceeded {
        /// The configured ceiling in bytes.
        limit: u64,
        /// Bytes charged so far, including the line that crossed the ceiling.
        consumed: u64,
        /// The 1-based line number that crossed the ceiling.
        line_number: usize,
    },
}

/// A specialized Result type for sieve-jsonl operations.
pub type Result<T> = std::result::Result<T, Error>;
