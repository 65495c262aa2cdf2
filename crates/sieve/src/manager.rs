//! The data manager: mode dispatch, snapshot ownership, and locking.
//!
//! A [`DataManager`] is built for exactly one [`Mode`] and keeps it for its
//! whole lifetime. Operations that belong to the other mode fail with
//! [`Error::ModeMismatch`] before touching any data.
//!
//! # Thread Safety
//!
//! The current snapshot lives behind a `tokio::sync::RwLock<Arc<Snapshot>>`.
//! Lookups and filters take the read lock for their duration. A load builds
//! its snapshot without holding any lock and takes the write lock only to
//! swap the `Arc`, so readers see either the whole old snapshot or the whole
//! new one. A failed load never reaches the swap and leaves the previous
//! snapshot in place.

use std::path::Path;
use std::sync::Arc;

use sieve_jsonl::{DEFAULT_MEMORY_LIMIT, ScanOptions};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::SieveConfig;
use crate::domain::{FilterCondition, Mode, Record};
use crate::error::{Error, Result};
use crate::filter::filter_records;
use crate::storage::{PassReport, Snapshot, materialize, stream_filter};

/// Outcome of a successful materializing load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records now held in the dataset.
    pub records: usize,
    /// Records skipped for lack of a string key.
    pub dropped: usize,
    /// Source totals for the pass.
    pub pass: PassReport,
}

/// Owns the active dataset and dispatches to the ingestion strategies.
///
/// # Examples
///
/// ```no_run
/// use sieve::domain::{FilterCondition, Mode, Operator};
/// use sieve::manager::DataManager;
///
/// # async fn example() -> sieve::error::Result<()> {
/// let manager = DataManager::new(Mode::Materializing);
/// manager.load("users.jsonl", "username").await?;
///
/// let adults = manager
///     .filter(&[FilterCondition::integer("age", Operator::Ge, 18)])
///     .await?;
/// let user = manager.get_by_key("user2").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DataManager {
    mode: Mode,
    options: ScanOptions,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl DataManager {
    /// Creates a manager with the default 2 GiB ceiling and abort-on-decode
    /// policy.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self::with_options(mode, ScanOptions::default())
    }

    /// Creates a manager with a custom memory ceiling in bytes.
    #[must_use]
    pub fn with_memory_limit(mode: Mode, memory_limit: u64) -> Self {
        Self::with_options(
            mode,
            ScanOptions {
                memory_limit,
                ..ScanOptions::default()
            },
        )
    }

    /// Creates a manager with explicit per-pass options.
    #[must_use]
    pub fn with_options(mode: Mode, options: ScanOptions) -> Self {
        Self {
            mode,
            options,
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
        }
    }

    /// Creates a manager from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &SieveConfig) -> Self {
        Self::with_options(config.mode, config.scan_options())
    }

    /// The mode fixed at construction.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The memory ceiling applied to every pass.
    #[must_use]
    pub fn memory_limit(&self) -> u64 {
        self.options.memory_limit
    }

    /// Loads `path` keyed by `key_field` and installs it as the current
    /// dataset.
    ///
    /// # Errors
    ///
    /// - [`Error::ModeMismatch`] unless the manager is materializing.
    /// - [`Error::Io`], [`Error::Decode`], [`Error::MemoryLimitExceeded`]
    ///   from the pass. The previous dataset stays installed.
    pub async fn load(&self, path: impl AsRef<Path>, key_field: &str) -> Result<LoadReport> {
        self.require(Mode::Materializing, "load")?;
        let path = path.as_ref();
        debug!(path = %path.display(), key_field, "materializing source");

        let (snapshot, pass) = materialize(path, key_field, &self.options).await?;
        let report = LoadReport {
            records: snapshot.len(),
            dropped: snapshot.dropped,
            pass,
        };

        *self.snapshot.write().await = Arc::new(snapshot);

        info!(
            path = %path.display(),
            records = report.records,
            dropped = report.dropped,
            bytes = report.pass.bytes_read,
            "dataset loaded"
        );
        Ok(report)
    }

    /// Reads `path` and returns the records matching `conditions`, in source
    /// order, without retaining anything.
    ///
    /// # Errors
    ///
    /// - [`Error::ModeMismatch`] unless the manager is streaming.
    /// - [`Error::Io`], [`Error::Decode`], [`Error::MemoryLimitExceeded`]
    ///   from the pass. No partial result is returned.
    pub async fn load_and_filter(
        &self,
        path: impl AsRef<Path>,
        conditions: &[FilterCondition],
    ) -> Result<Vec<Record>> {
        self.require(Mode::Streaming, "load_and_filter")?;
        let path = path.as_ref();
        debug!(path = %path.display(), conditions = conditions.len(), "streaming source");

        let (records, pass) = stream_filter(path, conditions, &self.options).await?;

        info!(
            path = %path.display(),
            matched = records.len(),
            scanned = pass.records_decoded,
            bytes = pass.bytes_read,
            "stream filtered"
        );
        Ok(records)
    }

    /// Returns a copy of the record stored under `key`.
    ///
    /// # Errors
    ///
    /// [`Error::ModeMismatch`] unless the manager is materializing.
    pub async fn get_by_key(&self, key: &str) -> Result<Option<Record>> {
        self.require(Mode::Materializing, "get_by_key")?;
        let snapshot = self.snapshot.read().await;
        Ok(snapshot.dataset.get(key).cloned())
    }

    /// Returns the 1-based source line the record under `key` was loaded
    /// from.
    ///
    /// # Errors
    ///
    /// [`Error::ModeMismatch`] unless the manager is materializing.
    pub async fn position_of(&self, key: &str) -> Result<Option<usize>> {
        self.require(Mode::Materializing, "position_of")?;
        let snapshot = self.snapshot.read().await;
        Ok(snapshot.index.position(key))
    }

    /// Returns copies of all loaded records matching `conditions`.
    ///
    /// Result order is unspecified.
    ///
    /// # Errors
    ///
    /// [`Error::ModeMismatch`] unless the manager is materializing.
    pub async fn filter(&self, conditions: &[FilterCondition]) -> Result<Vec<Record>> {
        self.require(Mode::Materializing, "filter")?;
        let snapshot = self.snapshot.read().await;
        Ok(filter_records(snapshot.dataset.values(), conditions))
    }

    /// Number of records in the current dataset.
    ///
    /// # Errors
    ///
    /// [`Error::ModeMismatch`] unless the manager is materializing.
    pub async fn len(&self) -> Result<usize> {
        self.require(Mode::Materializing, "len")?;
        Ok(self.snapshot.read().await.len())
    }

    /// Returns the current snapshot.
    ///
    /// The returned `Arc` stays valid after a later reload; it simply keeps
    /// describing the load it came from.
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.snapshot.read().await)
    }

    fn require(&self, expected: Mode, operation: &'static str) -> Result<()> {
        if self.mode == expected {
            Ok(())
        } else {
            Err(Error::ModeMismatch {
                operation,
                mode: self.mode,
            })
        }
    }
}

impl Default for DataManager {
    fn default() -> Self {
        Self::with_memory_limit(Mode::Materializing, DEFAULT_MEMORY_LIMIT)
    }
}
