//! Configuration loading for sieve.
//!
//! Configuration is a YAML file:
//!
//! ```yaml
//! source: data/users.jsonl
//! key-field: username
//! mode: materializing
//! memory-limit: 2147483648
//! on-decode-error: abort
//! reload-interval-secs: 30
//! ```
//!
//! Only `source` and `mode` are required; `key-field` is required in
//! materializing mode. Condition lists live in their own YAML or JSON file
//! (see [`load_conditions`]).

use crate::domain::{FilterCondition, Mode};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sieve_jsonl::{DEFAULT_MEMORY_LIMIT, DecodePolicy, ScanOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Default name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "sieve.yaml";

fn default_memory_limit() -> u64 {
    DEFAULT_MEMORY_LIMIT
}

/// Configuration file structure for sieve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct SieveConfig {
    /// Path of the NDJSON source.
    pub source: PathBuf,

    /// Field whose string value keys the dataset.
    #[serde(default)]
    pub key_field: String,

    /// Operating mode.
    pub mode: Mode,

    /// Ceiling on bytes read per pass.
    #[serde(default = "default_memory_limit")]
    pub memory_limit: u64,

    /// Handling of malformed lines.
    #[serde(default)]
    pub on_decode_error: DecodePolicy,

    /// Seconds between scheduled reloads; absent means no reloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reload_interval_secs: Option<u64>,
}

impl SieveConfig {
    /// Create a configuration with default limits.
    pub fn new(source: impl Into<PathBuf>, key_field: impl Into<String>, mode: Mode) -> Self {
        Self {
            source: source.into(),
            key_field: key_field.into(),
            mode,
            memory_limit: DEFAULT_MEMORY_LIMIT,
            on_decode_error: DecodePolicy::default(),
            reload_interval_secs: None,
        }
    }

    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it does not parse or fails [`validate`](Self::validate).
    pub async fn load(path: &Path) -> Result<Self> {
        let config = Self::read(path).await?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML file without validating it.
    ///
    /// Used when later overrides (command-line flags) may still fill in
    /// missing values; call [`validate`](Self::validate) afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it does not parse.
    pub async fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Check the configuration for values no pass could run with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty source path, a zero memory
    /// limit, a zero reload interval, or a missing key field in
    /// materializing mode.
    pub fn validate(&self) -> Result<()> {
        if self.source.as_os_str().is_empty() {
            return Err(Error::Config("source path must not be empty".to_string()));
        }
        if self.memory_limit == 0 {
            return Err(Error::Config(
                "memory-limit must be greater than zero".to_string(),
            ));
        }
        if self.mode == Mode::Materializing && self.key_field.trim().is_empty() {
            return Err(Error::Config(
                "key-field is required in materializing mode".to_string(),
            ));
        }
        if self.reload_interval_secs == Some(0) {
            return Err(Error::Config(
                "reload-interval-secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Per-pass options derived from this configuration.
    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            memory_limit: self.memory_limit,
            on_decode_error: self.on_decode_error,
        }
    }

    /// Interval between scheduled reloads, if configured.
    #[must_use]
    pub fn reload_interval(&self) -> Option<Duration> {
        self.reload_interval_secs.map(Duration::from_secs)
    }
}

/// Load a list of structured conditions from a YAML or JSON file.
///
/// Each entry has the fields `field`, `type`, `op` and `value`. Unknown type
/// names and operators are kept and evaluate to false.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`] if
/// it is not a list of conditions.
pub async fn load_conditions(path: &Path) -> Result<Vec<FilterCondition>> {
    let content = fs::read_to_string(path).await?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(&content).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
}
