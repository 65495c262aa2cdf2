//! Materializing strategy: load the whole source into a keyed snapshot.

use std::path::Path;

use serde_json::Value;
use sieve_jsonl::{ScanOptions, scan_file};
use tracing::{debug, warn};

use super::PassReport;
use super::snapshot::{Dataset, Index, Snapshot};
use crate::error::Result;

/// Reads `path` into a new [`Snapshot`] keyed by `key_field`.
///
/// Records whose key field is missing or not a JSON string are dropped and
/// counted in [`Snapshot::dropped`]. When two records share a key the later
/// line wins, in both the dataset and the index.
///
/// # Errors
///
/// Fails on I/O errors, on a malformed line (under the abort policy), and
/// when the pass reads more than `options.memory_limit` bytes. No partial
/// snapshot is returned.
pub async fn materialize(
    path: &Path,
    key_field: &str,
    options: &ScanOptions,
) -> Result<(Snapshot, PassReport)> {
    let mut dataset = Dataset::new();
    let mut index = Index::new(key_field);
    let mut dropped = 0usize;

    let summary = scan_file(path, options, |line_number, record| {
        let Some(Value::String(key)) = record.get(key_field) else {
            debug!(line_number, key_field, "record has no string key, dropping");
            dropped += 1;
            return;
        };
        let key = key.clone();
        index.insert(key.clone(), line_number);
        dataset.insert(key, record);
    })
    .await?;

    if dropped > 0 {
        warn!(
            dropped,
            key_field,
            path = %path.display(),
            "records without a string key were not loaded"
        );
    }

    let snapshot = Snapshot {
        dataset,
        index,
        dropped,
    };
    Ok((snapshot, summary.into()))
}
