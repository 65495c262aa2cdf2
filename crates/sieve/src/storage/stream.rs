//! Streaming strategy: filter records as they are read.

use std::path::Path;

use sieve_jsonl::{ScanOptions, scan_file};
use tracing::debug;

use super::PassReport;
use crate::domain::{FilterCondition, Record};
use crate::error::Result;
use crate::filter::matches;

/// Reads `path` and returns the records matching every condition, in source
/// order.
///
/// Only the current record and the matches found so far are held; no keyed
/// dataset is built.
///
/// # Errors
///
/// Same failure modes as [`materialize`](super::materialize). On failure the
/// matches collected so far are discarded.
pub async fn stream_filter(
    path: &Path,
    conditions: &[FilterCondition],
    options: &ScanOptions,
) -> Result<(Vec<Record>, PassReport)> {
    let mut matched = Vec::new();

    let summary = scan_file(path, options, |line_number, record| {
        if matches(&record, conditions) {
            debug!(line_number, "record matched");
            matched.push(record);
        }
    })
    .await?;

    Ok((matched, summary.into()))
}
