//! Sieve CLI binary.

use anyhow::Result;
use sieve::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the sieve CLI.
///
/// The CLI performs one pass at a time, so a current-thread runtime is
/// enough; `watch` runs its scheduler as a task on the same thread.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Controlled via RUST_LOG, e.g. RUST_LOG=sieve=debug,sieve_jsonl=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sieve=info,sieve_jsonl=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting sieve CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Sieve CLI completed successfully");
    Ok(())
}
