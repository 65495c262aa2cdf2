//! Single-pass scanning of a JSONL source into JSON objects.
//!
//! [`scan_objects`] drives one pass: read a line, charge it against a fresh
//! [`MemoryBudget`], decode it as a JSON object, hand it to the visitor. The
//! visitor owns each object it receives; the scanner keeps nothing.
//!
//! # Failure policy
//!
//! - **I/O errors** always end the pass.
//! - **Memory ceiling**: checked per line *before* decoding; crossing it ends
//!   the pass. A line is never buffered past the remaining budget, so a
//!   single huge line fails as soon as it crosses the ceiling.
//! - **Malformed lines** end the pass under [`DecodePolicy::Abort`] (the
//!   default). Under [`DecodePolicy::Skip`] they are recorded as warnings.
//! - **Blank lines** are skipped with a warning under either policy.
//!
//! Callers are expected to discard whatever the visitor accumulated when a
//! pass fails.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::fs::File;
use tokio::io::AsyncRead;
use tracing::{debug, warn};

use crate::budget::{DEFAULT_MEMORY_LIMIT, MemoryBudget};
use crate::error::{Error, Result};
use crate::reader::JsonlReader;
use crate::warning::Warning;

/// A decoded JSONL line.
pub type Object = Map<String, Value>;

/// What to do with a line that is not a valid JSON object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecodePolicy {
    /// Fail the whole pass.
    #[default]
    Abort,
    /// Record a [`Warning::MalformedJson`] and continue with the next line.
    Skip,
}

/// Per-pass settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Ceiling on the bytes read in one pass.
    pub memory_limit: u64,
    /// Handling of malformed lines.
    pub on_decode_error: DecodePolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            memory_limit: DEFAULT_MEMORY_LIMIT,
            on_decode_error: DecodePolicy::Abort,
        }
    }
}

/// Totals for a completed pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Lines read, including skipped ones.
    pub lines_read: usize,
    /// Objects handed to the visitor.
    pub objects: usize,
    /// Bytes charged against the budget (line terminators excluded).
    pub bytes_read: u64,
    /// Lines that were skipped.
    pub warnings: Vec<Warning>,
}

/// Scans every line of `reader`, passing each decoded object and its line
/// number to `visit`.
///
/// # Errors
///
/// Returns [`Error::Io`] on read failure, [`Error::MemoryLimitExceeded`] when
/// the ceiling is crossed, and [`Error::Decode`] for a malformed line under
/// [`DecodePolicy::Abort`].
pub async fn scan_objects<R, F>(reader: R, options: &ScanOptions, mut visit: F) -> Result<ScanSummary>
where
    R: AsyncRead + Unpin,
    F: FnMut(usize, Object),
{
    let mut reader = JsonlReader::new(reader);
    let mut budget = MemoryBudget::new(options.memory_limit);
    let mut summary = ScanSummary::default();

    while let Some(line) = reader.next_line_within(budget.remaining()).await? {
        summary.lines_read += 1;
        // A truncated line is one byte past the remaining budget, so this fails.
        budget.charge(line.bytes.len(), line.number)?;

        if line.is_blank() {
            debug!(line_number = line.number, "skipping blank line");
            summary.warnings.push(Warning::SkippedLine {
                line_number: line.number,
                reason: "blank line".to_string(),
            });
            continue;
        }

        match serde_json::from_slice::<Object>(line.bytes) {
            Ok(object) => {
                summary.objects += 1;
                visit(line.number, object);
            }
            Err(source) => match options.on_decode_error {
                DecodePolicy::Abort => {
                    return Err(Error::Decode {
                        line_number: line.number,
                        source,
                    });
                }
                DecodePolicy::Skip => {
                    warn!(line_number = line.number, error = %source, "skipping malformed line");
                    summary.warnings.push(Warning::MalformedJson {
                        line_number: line.number,
                        error: source.to_string(),
                    });
                }
            },
        }
    }

    summary.bytes_read = budget.consumed();
    Ok(summary)
}

/// Opens `path` and runs [`scan_objects`] over it.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened, plus any error from
/// [`scan_objects`].
pub async fn scan_file<F>(path: &Path, options: &ScanOptions, visit: F) -> Result<ScanSummary>
where
    F: FnMut(usize, Object),
{
    debug!(path = %path.display(), limit = options.memory_limit, "starting scan");
    let file = File::open(path).await?;
    let summary = scan_objects(file, options, visit).await?;
    debug!(
        path = %path.display(),
        lines = summary.lines_read,
        bytes = summary.bytes_read,
        "scan finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn options(limit: u64, policy: DecodePolicy) -> ScanOptions {
        ScanOptions {
            memory_limit: limit,
            on_decode_error: policy,
        }
    }

    async fn run(input: &'static str, opts: ScanOptions) -> Result<(ScanSummary, Vec<(usize, Object)>)> {
        let mut seen = Vec::new();
        let summary = scan_objects(Cursor::new(input.as_bytes()), &opts, |n, obj| {
            seen.push((n, obj));
        })
        .await?;
        Ok((summary, seen))
    }

    #[tokio::test]
    async fn visits_each_object_with_line_number() {
        let (summary, seen) = run("{\"a\":1}\n{\"a\":2}\n", ScanOptions::default())
            .await
            .unwrap();
        assert_eq!(summary.objects, 2);
        assert_eq!(summary.lines_read, 2);
        assert_eq!(seen[0].0, 1);
        assert_eq!(seen[1].1["a"], 2);
    }

    #[tokio::test]
    async fn bytes_read_excludes_terminators() {
        let (summary, _) = run("{}\r\n{}\n", ScanOptions::default()).await.unwrap();
        assert_eq!(summary.bytes_read, 4);
    }

    #[tokio::test]
    async fn malformed_line_aborts_by_default() {
        let err = run("{\"a\":1}\n{oops\n{\"a\":3}\n", ScanOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode { line_number: 2, .. }));
    }

    #[tokio::test]
    async fn non_object_line_is_a_decode_error() {
        let err = run("[1,2,3]\n", ScanOptions::default()).await.unwrap_err();
        assert!(matches!(err, Error::Decode { line_number: 1, .. }));
    }

    #[tokio::test]
    async fn skip_policy_records_warning_and_continues() {
        let (summary, seen) = run(
            "{\"a\":1}\n{oops\n{\"a\":3}\n",
            options(DEFAULT_MEMORY_LIMIT, DecodePolicy::Skip),
        )
        .await
        .unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].0, 3);
        assert_eq!(summary.warnings.len(), 1);
        assert_eq!(summary.warnings[0].kind(), "malformed_json");
        assert_eq!(summary.warnings[0].line_number(), 2);
    }

    #[tokio::test]
    async fn blank_lines_are_skipped_under_abort() {
        let (summary, seen) = run("{\"a\":1}\n\n{\"a\":2}\n", ScanOptions::default())
            .await
            .unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(summary.warnings.len(), 1);
        assert_eq!(summary.warnings[0].kind(), "skipped_line");
    }

    #[tokio::test]
    async fn ceiling_is_checked_before_decoding() {
        // The second line is malformed, but the budget trips first: only one
        // byte past the 1 byte left is read from it.
        let err = run("{\"a\":1}\n{oops}\n", options(8, DecodePolicy::Abort))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MemoryLimitExceeded {
                limit: 8,
                consumed: 9,
                line_number: 2
            }
        ));
    }

    #[tokio::test]
    async fn ceiling_failure_stops_visiting() {
        let mut visited = 0;
        let result = scan_objects(
            Cursor::new(b"{\"n\":1}\n{\"n\":2}\n{\"n\":3}\n".as_slice()),
            &options(10, DecodePolicy::Abort),
            |_, _| visited += 1,
        )
        .await;
        assert!(result.is_err());
        assert_eq!(visited, 1);
    }

    #[tokio::test]
    async fn endless_line_fails_without_buffering_it() {
        use tokio::io::AsyncReadExt;

        let source = tokio::io::repeat(b'a').take(64 * 1024 * 1024);
        let err = scan_objects(source, &options(100, DecodePolicy::Abort), |_, _| {})
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MemoryLimitExceeded {
                limit: 100,
                consumed: 101,
                line_number: 1
            }
        ));
    }

    #[tokio::test]
    async fn long_line_after_short_ones_stops_at_the_ceiling() {
        let mut input = b"{\"n\":1}\n".to_vec();
        input.extend(std::iter::repeat_n(b'x', 10_000));
        input.push(b'\n');

        let err = scan_objects(Cursor::new(input), &options(50, DecodePolicy::Abort), |_, _| {})
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MemoryLimitExceeded {
                consumed: 51,
                line_number: 2,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = scan_file(
            Path::new("/definitely/not/here.jsonl"),
            &ScanOptions::default(),
            |_, _| {},
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn decode_policy_deserializes_from_kebab_case() {
        let policy: DecodePolicy = serde_json::from_str("\"skip\"").unwrap();
        assert_eq!(policy, DecodePolicy::Skip);
        assert_eq!(DecodePolicy::default(), DecodePolicy::Abort);
    }
}
