//! Byte accounting for a single read pass.
//!
//! A [`MemoryBudget`] is created fresh for every pass over a source. Each
//! line is charged before it is decoded; the first charge that pushes the
//! running total over the ceiling fails the pass.

use crate::error::{Error, Result};

/// Default ceiling for a single pass: 2 GiB.
pub const DEFAULT_MEMORY_LIMIT: u64 = 2 * 1024 * 1024 * 1024;

/// Ceiling plus running counter of bytes consumed in one pass.
///
/// The counter only ever grows. Once [`charge`](Self::charge) has returned
/// an error the budget is spent and the pass must stop.
///
/// # Examples
///
/// ```
/// use sieve_jsonl::MemoryBudget;
///
/// let mut budget = MemoryBudget::new(10);
/// assert!(budget.charge(6, 1).is_ok());
/// assert!(budget.charge(6, 2).is_err());
/// assert_eq!(budget.consumed(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryBudget {
    limit: u64,
    consumed: u64,
}

impl MemoryBudget {
    /// Creates an empty budget with the given ceiling in bytes.
    #[must_use]
    pub fn new(limit: u64) -> Self {
        Self { limit, consumed: 0 }
    }

    /// Adds `bytes` to the running total.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MemoryLimitExceeded`] when the new total is strictly
    /// greater than the ceiling. A total equal to the ceiling is allowed.
    pub fn charge(&mut self, bytes: usize, line_number: usize) -> Result<()> {
        self.consumed = self.consumed.saturating_add(bytes as u64);
        if self.consumed > self.limit {
            return Err(Error::MemoryLimitExceeded {
                limit: self.limit,
                consumed: self.consumed,
                line_number,
            });
        }
        Ok(())
    }

    /// The configured ceiling in bytes.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Bytes charged so far.
    #[must_use]
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Bytes left before the ceiling is reached.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.consumed)
    }
}

impl Default for MemoryBudget {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_LIMIT)
    }
}
