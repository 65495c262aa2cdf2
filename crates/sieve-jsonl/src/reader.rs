//! Line reading for JSONL sources.
//!
//! This module provides async, buffered, line-by-line reading with line
//! number tracking for error reporting. Lines are yielded as raw bytes with
//! the terminator (`\n` or `\r\n`) removed; decoding is left to the caller.
//!
//! [`JsonlReader::next_line_within`] caps how much of a line is buffered, so
//! a source with one enormous line (or no newline at all) cannot pull more
//! than the cap into memory.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::error::Result;

/// One line of a JSONL source, borrowed from the reader's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The 1-based line number.
    pub number: usize,
    /// The line content without its terminator.
    ///
    /// When [`truncated`](Self::truncated) is set this is only a prefix,
    /// one byte longer than the cap the line was read with.
    pub bytes: &'a [u8],
    /// The line was longer than the cap and reading stopped early. The rest
    /// of the line is still unread; the caller is expected to stop.
    pub truncated: bool,
}

impl Line<'_> {
    /// Returns `true` if the line holds nothing but ASCII whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.bytes.iter().all(u8::is_ascii_whitespace)
    }
}

/// Async reader for JSONL (JSON Lines) data.
///
/// `JsonlReader` wraps an async reader in a [`BufReader`] and hands out one
/// line at a time, reusing a single internal buffer so only the current line
/// is held in memory.
///
/// # Examples
///
/// ```no_run
/// use sieve_jsonl::JsonlReader;
/// use tokio::fs::File;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("data.jsonl").await?;
/// let mut reader = JsonlReader::new(file);
/// while let Some(line) = reader.next_line().await? {
///     println!("{}: {} bytes", line.number, line.bytes.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct JsonlReader<R> {
    reader: BufReader<R>,
    /// Current line number (0 before any lines are read).
    line_number: usize,
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> JsonlReader<R> {
    /// Creates a new `JsonlReader` wrapping the given async reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buf: Vec::new(),
        }
    }

    /// Creates a new `JsonlReader` with a custom buffer capacity.
    ///
    /// This is useful when you know the typical line length of your JSONL data
    /// and want to optimize buffer allocation.
    #[must_use]
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            buf: Vec::new(),
        }
    }

    /// Returns the current line number.
    ///
    /// Returns 0 before any lines have been read. After reading, returns the
    /// 1-based line number of the last line read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next line.
    ///
    /// Returns `Ok(None)` at end of input. A final newline at the end of the
    /// source does not produce an extra empty line. The line is buffered in
    /// full however long it is; use [`next_line_within`](Self::next_line_within)
    /// to bound memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the underlying reader fails.
    pub async fn next_line(&mut self) -> Result<Option<Line<'_>>> {
        self.next_line_within(u64::MAX).await
    }

    /// Reads the next line, buffering at most `max_bytes + 1` content bytes.
    ///
    /// A line whose content fits in `max_bytes` is returned whole. A longer
    /// line comes back [`truncated`](Line::truncated) with exactly
    /// `max_bytes + 1` bytes, which is enough for the caller to tell it went
    /// over; nothing past that is read from the source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the underlying reader fails.
    pub async fn next_line_within(&mut self, max_bytes: u64) -> Result<Option<Line<'_>>> {
        self.buf.clear();
        // Content plus one overflow byte plus a possible '\r'.
        let cap = usize::try_from(max_bytes)
            .unwrap_or(usize::MAX)
            .saturating_add(2);

        let mut terminated = false;
        loop {
            let available = self.reader.fill_buf().await?;
            if available.is_empty() {
                break;
            }
            let room = cap - self.buf.len();
            let window = &available[..available.len().min(room)];

            let taken = match window.iter().position(|&b| b == b'\n') {
                Some(i) => {
                    terminated = true;
                    i + 1
                }
                None => window.len(),
            };
            self.buf.extend_from_slice(&window[..taken]);
            self.reader.consume(taken);

            if terminated || self.buf.len() >= cap {
                break;
            }
        }

        if self.buf.is_empty() {
            return Ok(None);
        }
        self.line_number += 1;

        if !terminated && self.buf.len() >= cap {
            return Ok(Some(Line {
                number: self.line_number,
                bytes: &self.buf[..cap - 1],
                truncated: true,
            }));
        }

        let mut end = self.buf.len();
        if end > 0 && self.buf[end - 1] == b'\n' {
            end -= 1;
            if end > 0 && self.buf[end - 1] == b'\r' {
                end -= 1;
            }
        }

        Ok(Some(Line {
            number: self.line_number,
            bytes: &self.buf[..end],
            truncated: false,
        }))
    }

    /// Consumes the reader, returning the underlying buffered reader.
    #[must_use]
    pub fn into_inner(self) -> BufReader<R> {
        self.reader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    async fn collect(input: &'static [u8]) -> Vec<(usize, Vec<u8>)> {
        let mut reader = JsonlReader::new(Cursor::new(input));
        let mut lines = Vec::new();
        while let Some(line) = reader.next_line().await.unwrap() {
            lines.push((line.number, line.bytes.to_vec()));
        }
        lines
    }

    #[tokio::test]
    async fn new_reader_starts_at_line_zero() {
        let reader = JsonlReader::new(Cursor::new(b""));
        assert_eq!(reader.line_number(), 0);
    }

    #[tokio::test]
    async fn empty_input_yields_nothing() {
        assert!(collect(b"").await.is_empty());
    }

    #[tokio::test]
    async fn lines_are_numbered_from_one() {
        let lines = collect(b"{\"a\":1}\n{\"a\":2}\n").await;
        assert_eq!(
            lines,
            vec![(1, b"{\"a\":1}".to_vec()), (2, b"{\"a\":2}".to_vec())]
        );
    }

    #[tokio::test]
    async fn last_line_without_newline_is_returned() {
        let lines = collect(b"one\ntwo").await;
        assert_eq!(lines, vec![(1, b"one".to_vec()), (2, b"two".to_vec())]);
    }

    #[tokio::test]
    async fn crlf_terminators_are_stripped() {
        let lines = collect(b"one\r\ntwo\r\n").await;
        assert_eq!(lines, vec![(1, b"one".to_vec()), (2, b"two".to_vec())]);
    }

    #[tokio::test]
    async fn blank_lines_are_reported_and_counted() {
        let lines = collect(b"one\n\n  \nfour\n").await;
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], (2, Vec::new()));
        assert_eq!(lines[3].0, 4);
    }

    #[test]
    fn is_blank_detects_whitespace_only() {
        let line = |bytes: &'static [u8]| Line {
            number: 1,
            bytes,
            truncated: false,
        };
        assert!(line(b"").is_blank());
        assert!(line(b" \t ").is_blank());
        assert!(!line(b" {} ").is_blank());
    }

    #[tokio::test]
    async fn with_capacity_reads_long_lines() {
        let mut reader = JsonlReader::with_capacity(Cursor::new(b"abcdefghij\nxy\n"), 4);
        let first = reader.next_line().await.unwrap().unwrap();
        assert_eq!(first.bytes, b"abcdefghij");
        let second = reader.next_line().await.unwrap().unwrap();
        assert_eq!(second.bytes, b"xy");
        assert!(reader.next_line().await.unwrap().is_none());
        assert_eq!(reader.line_number(), 2);
    }

    #[tokio::test]
    async fn line_within_cap_is_returned_whole() {
        let mut reader = JsonlReader::with_capacity(Cursor::new(b"abcd\r\nefgh\n"), 2);
        let first = reader.next_line_within(4).await.unwrap().unwrap();
        assert_eq!(first.bytes, b"abcd");
        assert!(!first.truncated);
        let second = reader.next_line_within(4).await.unwrap().unwrap();
        assert_eq!(second.bytes, b"efgh");
    }

    #[tokio::test]
    async fn line_over_cap_is_truncated_after_one_extra_byte() {
        let mut reader = JsonlReader::new(Cursor::new(b"abcdefghij\nxy\n"));
        let line = reader.next_line_within(4).await.unwrap().unwrap();
        assert!(line.truncated);
        assert_eq!(line.bytes, b"abcde");
        assert_eq!(line.number, 1);
    }

    #[tokio::test]
    async fn endless_line_reads_only_up_to_cap() {
        use tokio::io::AsyncReadExt;

        let mut reader = JsonlReader::new(tokio::io::repeat(b'a').take(64 * 1024 * 1024));
        let line = reader.next_line_within(100).await.unwrap().unwrap();
        assert!(line.truncated);
        assert_eq!(line.bytes.len(), 101);
    }
}
