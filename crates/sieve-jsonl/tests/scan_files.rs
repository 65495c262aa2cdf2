//! Integration tests for scanning JSONL files from disk.
//!
//! These tests exercise `scan_file` against real temporary files, covering
//! budget enforcement, decode policies, and summary totals.

use rstest::rstest;
use serde_json::json;
use sieve_jsonl::{DecodePolicy, Error, ScanOptions, scan_file};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_source(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn users_source() -> NamedTempFile {
    write_source(concat!(
        r#"{"username":"user1","age":25,"fullname":"James Brown"}"#,
        "\n",
        r#"{"username":"user2","age":35,"fullname":"Alice Jameson"}"#,
        "\n",
        r#"{"username":"user3","age":40,"fullname":"James Smith"}"#,
        "\n",
    ))
}

#[tokio::test]
async fn scans_all_records_in_order() {
    let file = users_source();
    let mut names = Vec::new();

    let summary = scan_file(file.path(), &ScanOptions::default(), |_, object| {
        names.push(object["username"].clone());
    })
    .await
    .unwrap();

    assert_eq!(names, vec![json!("user1"), json!("user2"), json!("user3")]);
    assert_eq!(summary.objects, 3);
    assert!(summary.warnings.is_empty());
}

#[tokio::test]
async fn bytes_read_matches_file_size_minus_newlines() {
    let file = users_source();
    let size = std::fs::metadata(file.path()).unwrap().len();

    let summary = scan_file(file.path(), &ScanOptions::default(), |_, _| {})
        .await
        .unwrap();

    assert_eq!(summary.bytes_read, size - 3);
}

#[tokio::test]
async fn oversized_source_fails_before_reading_everything() {
    let line = r#"{"id":"0123456789","payload":"abcdefghijklmnopqrstuvwxyz012345"}"#;
    let content: String = (0..8).map(|_| format!("{line}\n")).collect();
    assert!(content.len() >= 500);
    let file = write_source(&content);

    let mut visited = 0usize;
    let options = ScanOptions {
        memory_limit: 100,
        on_decode_error: DecodePolicy::Abort,
    };
    let err = scan_file(file.path(), &options, |_, _| visited += 1)
        .await
        .unwrap_err();

    match err {
        Error::MemoryLimitExceeded {
            limit, line_number, ..
        } => {
            assert_eq!(limit, 100);
            assert_eq!(line_number, 2);
        }
        other => panic!("expected memory limit error, got {other:?}"),
    }
    assert!(visited * line.len() < 100);
}

#[rstest]
#[case::abort(DecodePolicy::Abort, true)]
#[case::skip(DecodePolicy::Skip, false)]
#[tokio::test]
async fn decode_policy_controls_malformed_lines(
    #[case] policy: DecodePolicy,
    #[case] expect_error: bool,
) {
    let file = write_source("{\"id\":\"a\"}\nnot json\n{\"id\":\"c\"}\n");
    let options = ScanOptions {
        on_decode_error: policy,
        ..ScanOptions::default()
    };

    let result = scan_file(file.path(), &options, |_, _| {}).await;

    assert_eq!(result.is_err(), expect_error);
    if let Ok(summary) = result {
        assert_eq!(summary.objects, 2);
        assert_eq!(summary.warnings.len(), 1);
        assert_eq!(summary.warnings[0].line_number(), 2);
    }
}

#[tokio::test]
async fn empty_file_is_an_empty_pass() {
    let file = write_source("");
    let summary = scan_file(file.path(), &ScanOptions::default(), |_, _| {})
        .await
        .unwrap();
    assert_eq!(summary, sieve_jsonl::ScanSummary::default());
}
