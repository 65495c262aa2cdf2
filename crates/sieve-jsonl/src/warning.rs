//! Non-fatal issues encountered during a read pass.
//!
//! Under [`DecodePolicy::Skip`](crate::DecodePolicy::Skip) malformed lines are
//! reported here instead of failing the pass. Blank lines are always skipped
//! and reported.

/// A non-fatal warning that occurred during JSONL processing.
///
/// Each variant carries the 1-based line number it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A line contained malformed JSON and was skipped.
    MalformedJson {
        /// The 1-based line number where the error occurred.
        line_number: usize,
        /// A description of the JSON parsing error.
        error: String,
    },

    /// A line was skipped for a reason other than malformed JSON.
    SkippedLine {
        /// The 1-based line number that was skipped.
        line_number: usize,
        /// The reason the line was skipped.
        reason: String,
    },
}

impl Warning {
    /// Returns the line number associated with this warning.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedJson { line_number, .. } | Self::SkippedLine { line_number, .. } => {
                *line_number
            }
        }
    }

    /// Returns a static string identifying the warning kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use sieve_jsonl::Warning;
    ///
    /// let warning = Warning::SkippedLine {
    ///     line_number: 3,
    ///     reason: "blank line".to_string(),
    /// };
    /// assert_eq!(warning.kind(), "skipped_line");
    /// ```
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedJson { .. } => "malformed_json",
            Self::SkippedLine { .. } => "skipped_line",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedJson { line_number, error } => {
                write!(f, "line {line_number}: malformed JSON: {error}")
            }
            Self::SkippedLine {
                line_number,
                reason,
            } => write!(f, "line {line_number}: skipped: {reason}"),
        }
    }
}
