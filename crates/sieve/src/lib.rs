//! Sieve - keyed NDJSON ingestion with typed multi-field filtering.
//!
//! This crate provides both a CLI application and a library. A
//! [`DataManager`] reads a newline-delimited JSON source in one of two
//! modes:
//!
//! - **Materializing**: every record is loaded into a dataset keyed by a
//!   chosen field, with an index of source positions. Lookups and filters
//!   run against that snapshot, and reloads swap it atomically.
//! - **Streaming**: records are filtered as they are read and only the
//!   matches are kept.
//!
//! Both modes charge every line against a per-pass memory ceiling.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod manager;
pub mod reload;
pub mod storage;

// Public CLI module (needed by binary)
pub mod cli;

pub use domain::{FilterCondition, Mode, Operator, Record, ValueType};
pub use error::{Error, Result};
pub use manager::{DataManager, LoadReport};
