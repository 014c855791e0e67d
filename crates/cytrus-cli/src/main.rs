//! cytrus - rebuild game releases from a chunked CDN

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cytrus_cli::cmd;
use cytrus_cli::cmd::sync::SyncOptions;
use cytrus_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sync {
            version,
            output,
            concurrency,
            retries,
            retry_delay_ms,
            verify,
        } => {
            cmd::sync::sync(
                &cli.global,
                SyncOptions {
                    version: &version,
                    output: &output,
                    concurrency,
                    retries,
                    retry_delay: Duration::from_millis(retry_delay_ms),
                    verify,
                },
            )
            .await
        }
        Commands::Probe { version } => cmd::probe::probe(&cli.global, &version).await,
        Commands::Inspect {
            version,
            file,
            json,
        } => cmd::inspect::inspect(&cli.global, &version, file.as_deref(), json).await,
    }
}
