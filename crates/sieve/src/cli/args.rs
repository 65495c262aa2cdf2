//! CLI argument structs for all commands.

use clap::{Args, Parser};
use std::path::PathBuf;

use super::types::ModeArg;
use super::validators::{parse_byte_size, validate_key_field};

/// Where the data comes from and how to read it.
///
/// Values given on the command line override the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// NDJSON source file
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Field whose string value keys each record
    #[arg(short, long, value_parser = validate_key_field)]
    pub key_field: Option<String>,

    /// Operating mode
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Maximum bytes read per pass (e.g. 512M, 2G)
    #[arg(long, value_parser = parse_byte_size)]
    pub memory_limit: Option<u64>,

    /// Skip malformed lines instead of failing the pass
    #[arg(long)]
    pub skip_malformed: bool,
}

/// Arguments for the `query` command
#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    /// Source selection
    #[command(flatten)]
    pub source: SourceArgs,

    /// File with a list of conditions (YAML or JSON); omit to match everything
    #[arg(short = 'w', long = "where")]
    pub conditions: Option<PathBuf>,
}

/// Arguments for the `get` command
#[derive(Parser, Debug, Clone)]
pub struct GetArgs {
    /// Source selection
    #[command(flatten)]
    pub source: SourceArgs,

    /// Key value to look up
    pub key: String,
}

/// Arguments for the `watch` command
#[derive(Parser, Debug, Clone)]
pub struct WatchArgs {
    /// Source selection
    #[command(flatten)]
    pub source: SourceArgs,

    /// Conditions applied on every streaming reload
    #[arg(short = 'w', long = "where")]
    pub conditions: Option<PathBuf>,

    /// Seconds between reloads (overrides the configuration file)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
}
