//! The keyed dataset and its index, replaced together on every load.

use std::collections::HashMap;

use crate::domain::Record;

/// Records keyed by the string value of the key field.
pub type Dataset = HashMap<String, Record>;

/// Secondary index from key value to the line the record was loaded from.
///
/// Positions are 1-based source line numbers, so blank, malformed, and
/// keyless lines still advance them. They are not a count of distinct keys
/// loaded so far, and they have gaps whenever a line was skipped or a key was
/// repeated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Index {
    field: String,
    positions: HashMap<String, usize>,
}

impl Index {
    /// Creates an empty index over `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            positions: HashMap::new(),
        }
    }

    /// Name of the indexed key field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// 1-based source line of the record stored under `key`.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Number of indexed keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub(crate) fn insert(&mut self, key: String, line_number: usize) {
        self.positions.insert(key, line_number);
    }
}

/// One complete materialized load.
///
/// A snapshot is built off to the side and installed in a single swap, so
/// the dataset and index always describe the same pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Records by key.
    pub dataset: Dataset,
    /// Key positions.
    pub index: Index,
    /// Records skipped because the key field was absent or not a string.
    pub dropped: usize,
}

impl Snapshot {
    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    /// Returns `true` if the snapshot holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }
}
