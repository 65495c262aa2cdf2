//! Ingestion strategies and the snapshot they produce.
//!
//! Two strategies read a source through [`sieve_jsonl::scan_file`]:
//!
//! - [`materialize`] keeps every keyed record in a [`Snapshot`] (dataset plus
//!   index). Filtering is a later, separate pass over the snapshot.
//! - [`stream_filter`] runs the matcher on each record as it is decoded and
//!   keeps only the matches. Nothing else survives the pass.
//!
//! Both charge every line against a fresh memory budget and discard their
//! partial work on any failure.

mod materialize;
mod snapshot;
mod stream;

pub use materialize::materialize;
pub use snapshot::{Dataset, Index, Snapshot};
pub use stream::stream_filter;

use sieve_jsonl::{ScanSummary, Warning};

/// What a completed pass read from its source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Lines read, including blank and skipped ones.
    pub lines_read: usize,
    /// Lines decoded into records.
    pub records_decoded: usize,
    /// Bytes charged against the memory budget.
    pub bytes_read: u64,
    /// Lines skipped without failing the pass.
    pub warnings: Vec<Warning>,
}

impl From<ScanSummary> for PassReport {
    fn from(summary: ScanSummary) -> Self {
        Self {
            lines_read: summary.lines_read,
            records_decoded: summary.objects,
            bytes_read: summary.bytes_read,
            warnings: summary.warnings,
        }
    }
}
