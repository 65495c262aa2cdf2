//! Error types for sieve operations.
//!
//! Only whole-pass failures are errors. A field that is missing, has the
//! wrong JSON kind, or fails date parsing is never an error: the condition
//! simply does not match.

use crate::domain::Mode;
use std::io;
use thiserror::Error;

/// The error type for sieve operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The source could not be opened or read.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A source line is not a valid JSON object.
    #[error("line {line_number}: malformed JSON: {source}")]
    Decode {
        /// The 1-based line number of the offending line.
        line_number: usize,
        /// The underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The pass read more bytes than the configured ceiling allows.
    #[error(
        "memory limit of {limit} bytes exceeded at line {line_number} ({consumed} bytes read)"
    )]
    MemoryLimitExceeded {
        /// The configured ceiling in bytes.
        limit: u64,
        /// Bytes charged when the ceiling was crossed.
        consumed: u64,
        /// The line that crossed the ceiling.
        line_number: usize,
    },

    /// The operation is not available in the manager's mode.
    #[error("{operation} is not available in {mode} mode")]
    ModeMismatch {
        /// The operation that was attempted.
        operation: &'static str,
        /// The mode the manager was built with.
        mode: Mode,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<sieve_jsonl::Error> for Error {
    fn from(err: sieve_jsonl::Error) -> Self {
        match err {
            sieve_jsonl::Error::Io(io_err) => Self::Io(io_err),
            sieve_jsonl::Error::Decode {
                line_number,
                source,
            } => Self::Decode {
                line_number,
                source,
            },
            sieve_jsonl::Error::MemoryLimitExceeded {
                limit,
                consumed,
                line_number,
            } => Self::MemoryLimitExceeded {
                limit,
                consumed,
                line_number,
            },
        }
    }
}

/// A specialized Result type for sieve operations.
pub type Result<T> = std::result::Result<T, Error>;
