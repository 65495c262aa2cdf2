//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `query`: Load a source and print the records matching a condition file
//! - `get`: Print the record stored under one key
//! - `watch`: Load a source, then reload it on a fixed interval
//!
//! # Example
//!
//! ```bash
//! sieve query --source users.jsonl --key-field username --where adults.yaml
//! sieve query --config sieve.yaml --mode streaming --memory-limit 512M --where adults.yaml
//! sieve get --source users.jsonl --key-field username user2
//! sieve watch --config sieve.yaml --interval 30
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{GetArgs, QueryArgs, SourceArgs, WatchArgs};
pub use types::ModeArg;
pub use validators::{parse_byte_size, validate_key_field};

/// Sieve - keyed NDJSON loading and typed filtering
///
/// Loads newline-delimited JSON either fully into memory (indexed by a key
/// field) or streams it, and prints the records matching a list of typed
/// conditions.
#[derive(Parser, Debug)]
#[command(name = "sieve")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print records matching a list of conditions
    ///
    /// In materializing mode the whole source is loaded and indexed first;
    /// in streaming mode records are filtered as they are read.
    Query(QueryArgs),

    /// Print the record stored under a key
    ///
    /// Only available in materializing mode.
    Get(GetArgs),

    /// Load a source and keep reloading it
    ///
    /// Each reload is logged. In streaming mode the matches of every reload
    /// are printed.
    Watch(WatchArgs),
}

impl Cli {
    /// Parse CLI arguments from the environment
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Query(args) => execute::execute_query(args).await,
            Commands::Get(args) => execute::execute_get(args).await,
            Commands::Watch(args) => execute::execute_watch(args).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Mode;
    use std::path::PathBuf;

    #[test]
    fn query_parses_source_flags() {
        let cli = Cli::try_parse_from([
            "sieve",
            "query",
            "--source",
            "users.jsonl",
            "-k",
            "username",
            "--mode",
            "split",
            "--memory-limit",
            "1M",
            "--where",
            "q.yaml",
        ])
        .unwrap();

        let Commands::Query(args) = cli.command else {
            panic!("expected query command");
        };
        assert_eq!(args.source.source, Some(PathBuf::from("users.jsonl")));
        assert_eq!(args.source.key_field.as_deref(), Some("username"));
        assert_eq!(args.source.mode.map(Mode::from), Some(Mode::Streaming));
        assert_eq!(args.source.memory_limit, Some(1024 * 1024));
        assert_eq!(args.conditions, Some(PathBuf::from("q.yaml")));
    }

    #[test]
    fn get_requires_a_key() {
        assert!(Cli::try_parse_from(["sieve", "get", "--source", "a.jsonl"]).is_err());
        let cli = Cli::try_parse_from(["sieve", "get", "-s", "a.jsonl", "user2"]).unwrap();
        assert!(matches!(cli.command, Commands::Get(ref a) if a.key == "user2"));
    }

    #[test]
    fn watch_rejects_zero_interval() {
        assert!(Cli::try_parse_from(["sieve", "watch", "-s", "a.jsonl", "--interval", "0"]).is_err());
    }

    #[test]
    fn invalid_memory_limit_is_rejected() {
        assert!(
            Cli::try_parse_from(["sieve", "query", "-s", "a.jsonl", "--memory-limit", "lots"])
                .is_err()
        );
    }
}
