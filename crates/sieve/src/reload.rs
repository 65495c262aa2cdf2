//! Periodic reloading of a source on a fixed interval.
//!
//! The scheduler is a thin collaborator around [`DataManager`]: every tick
//! it calls `load` (materializing) or `load_and_filter` (streaming) with the
//! same arguments and logs the outcome. A failed reload is logged and the
//! loop keeps going; the manager still serves the last good dataset.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

use crate::domain::{FilterCondition, Record};
use crate::error::Result;
use crate::manager::{DataManager, LoadReport};

/// What each reload does.
#[derive(Debug, Clone)]
pub enum ReloadTarget {
    /// Rebuild the keyed dataset.
    Materialize {
        /// Source path.
        source: PathBuf,
        /// Key field.
        key_field: String,
    },
    /// Re-run a streaming filter.
    Stream {
        /// Source path.
        source: PathBuf,
        /// Conditions applied on every pass.
        conditions: Vec<FilterCondition>,
    },
}

/// Result of one successful reload.
#[derive(Debug, Clone)]
pub enum ReloadOutcome {
    /// A materializing load finished.
    Loaded(LoadReport),
    /// A streaming pass finished with these matches.
    Filtered(Vec<Record>),
}

type ResultSink = Box<dyn Fn(&[Record]) + Send + Sync>;

/// Reloads a source into a shared [`DataManager`] on a fixed interval.
pub struct ReloadScheduler {
    manager: Arc<DataManager>,
    target: ReloadTarget,
    every: Duration,
    on_results: Option<ResultSink>,
    completed: AtomicUsize,
    failed: AtomicUsize,
}

impl ReloadScheduler {
    /// Creates a scheduler; nothing runs until [`start`](Self::start).
    pub fn new(manager: Arc<DataManager>, target: ReloadTarget, every: Duration) -> Self {
        Self {
            manager,
            target,
            every,
            on_results: None,
            completed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    /// Registers a callback that receives the matches of every successful
    /// streaming reload.
    #[must_use]
    pub fn on_results(mut self, sink: impl Fn(&[Record]) + Send + Sync + 'static) -> Self {
        self.on_results = Some(Box::new(sink));
        self
    }

    /// Number of reloads that succeeded.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    /// Number of reloads that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }

    /// Performs one reload and returns its outcome.
    ///
    /// # Errors
    ///
    /// Propagates any error from the manager, including a mode mismatch
    /// when the target does not fit the manager's mode.
    pub async fn run_once(&self) -> Result<ReloadOutcome> {
        let outcome = match &self.target {
            ReloadTarget::Materialize { source, key_field } => self
                .manager
                .load(source, key_field)
                .await
                .map(ReloadOutcome::Loaded),
            ReloadTarget::Stream { source, conditions } => self
                .manager
                .load_and_filter(source, conditions)
                .await
                .map(ReloadOutcome::Filtered),
        };

        match &outcome {
            Ok(_) => self.completed.fetch_add(1, Ordering::Relaxed),
            Err(_) => self.failed.fetch_add(1, Ordering::Relaxed),
        };
        outcome
    }

    /// Runs reloads forever, one per interval.
    ///
    /// The first reload happens one full interval after the call; callers
    /// are expected to have done the initial load themselves. Spawn this on
    /// a task and abort the task to stop it.
    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.every.as_secs_f64(), "starting scheduled reload");

        let mut ticker = interval(self.every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    async fn tick(&self) {
        match self.run_once().await {
            Ok(ReloadOutcome::Loaded(report)) => {
                info!(
                    records = report.records,
                    dropped = report.dropped,
                    "scheduled reload completed"
                );
            }
            Ok(ReloadOutcome::Filtered(records)) => {
                info!(matched = records.len(), "scheduled filter completed");
                if let Some(sink) = &self.on_results {
                    sink(&records);
                }
            }
            Err(e) => {
                error!(error = %e, "scheduled reload failed");
            }
        }
    }
}

impl std::fmt::Debug for ReloadScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadScheduler")
            .field("target", &self.target)
            .field("every", &self.every)
            .field("completed", &self.completed())
            .field("failed", &self.failed())
            .finish_non_exhaustive()
    }
}
