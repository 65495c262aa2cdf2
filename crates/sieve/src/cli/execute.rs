//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use sieve_jsonl::DecodePolicy;

use super::args::{GetArgs, QueryArgs, SourceArgs, WatchArgs};
use crate::config::{SieveConfig, load_conditions};
use crate::domain::{FilterCondition, Mode, Record};
use crate::manager::DataManager;
use crate::reload::{ReloadOutcome, ReloadScheduler, ReloadTarget};

/// Merge the configuration file (if any) with command-line overrides.
async fn resolve_config(args: &SourceArgs) -> Result<SieveConfig> {
    let mut config = match &args.config {
        Some(path) => SieveConfig::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let Some(source) = &args.source else {
                bail!("either --config or --source is required");
            };
            SieveConfig::new(source, "", Mode::Materializing)
        }
    };

    if let Some(source) = &args.source {
        config.source.clone_from(source);
    }
    if let Some(key_field) = &args.key_field {
        config.key_field.clone_from(key_field);
    }
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(limit) = args.memory_limit {
        config.memory_limit = limit;
    }
    if args.skip_malformed {
        config.on_decode_error = DecodePolicy::Skip;
    }

    config.validate()?;
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

async fn read_conditions(path: Option<&std::path::Path>) -> Result<Vec<FilterCondition>> {
    match path {
        Some(path) => load_conditions(path)
            .await
            .with_context(|| format!("failed to load conditions from {}", path.display())),
        None => Ok(Vec::new()),
    }
}

/// Write records to stdout, one JSON object per line.
fn print_records(records: &[Record]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn key_of<'a>(record: &'a Record, key_field: &str) -> &'a str {
    record.get(key_field).and_then(Value::as_str).unwrap_or_default()
}

/// Execute the query command
pub async fn execute_query(args: &QueryArgs) -> Result<()> {
    let config = resolve_config(&args.source).await?;
    let conditions = read_conditions(args.conditions.as_deref()).await?;
    let manager = DataManager::from_config(&config);

    let records = match config.mode {
        Mode::Materializing => {
            let report = manager.load(&config.source, &config.key_field).await?;
            if report.dropped > 0 {
                eprintln!(
                    "Skipped {} record(s) without a string '{}' field",
                    report.dropped, config.key_field
                );
            }
            let mut records = manager.filter(&conditions).await?;
            records.sort_by(|a, b| key_of(a, &config.key_field).cmp(key_of(b, &config.key_field)));
            records
        }
        Mode::Streaming => manager.load_and_filter(&config.source, &conditions).await?,
    };

    print_records(&records)
}

/// Execute the get command
pub async fn execute_get(args: &GetArgs) -> Result<()> {
    let config = resolve_config(&args.source).await?;
    if config.mode == Mode::Streaming {
        bail!("get requires materializing mode");
    }

    let manager = DataManager::from_config(&config);
    manager.load(&config.source, &config.key_field).await?;

    match manager.get_by_key(&args.key).await? {
        Some(record) => print_records(std::slice::from_ref(&record)),
        None => bail!("no record with {} = '{}'", config.key_field, args.key),
    }
}

/// Execute the watch command
pub async fn execute_watch(args: &WatchArgs) -> Result<()> {
    let config = resolve_config(&args.source).await?;
    let every = match args.interval {
        Some(secs) => std::time::Duration::from_secs(secs),
        None => config
            .reload_interval()
            .context("no reload interval: pass --interval or set reload-interval-secs")?,
    };

    let target = match config.mode {
        Mode::Materializing => {
            if args.conditions.is_some() {
                tracing::warn!("conditions are ignored when watching in materializing mode");
            }
            ReloadTarget::Materialize {
                source: config.source.clone(),
                key_field: config.key_field.clone(),
            }
        }
        Mode::Streaming => ReloadTarget::Stream {
            source: config.source.clone(),
            conditions: read_conditions(args.conditions.as_deref()).await?,
        },
    };

    let manager = Arc::new(DataManager::from_config(&config));
    let scheduler = Arc::new(
        ReloadScheduler::new(Arc::clone(&manager), target, every).on_results(|records| {
            if let Err(e) = print_records(records) {
                tracing::error!(error = %e, "failed to write results");
            }
        }),
    );

    match scheduler.run_once().await? {
        ReloadOutcome::Loaded(report) => {
            eprintln!(
                "Loaded {} record(s) from {} ({} dropped)",
                report.records,
                config.source.display(),
                report.dropped
            );
        }
        ReloadOutcome::Filtered(records) => print_records(&records)?,
    }

    eprintln!(
        "Reloading every {}s; press Ctrl-C to stop",
        every.as_secs()
    );
    let handle = tokio::spawn(Arc::clone(&scheduler).start());
    tokio::signal::ctrl_c().await?;
    handle.abort();

    eprintln!(
        "Stopped after {} reload(s), {} failed",
        scheduler.completed(),
        scheduler.failed()
    );
    Ok(())
}
