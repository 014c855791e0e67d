//! Download and rebuild every platform of a release.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use crossterm::style::Stylize;
use cytrus_core::{Reporter, RetryPolicy, SkipPolicy, SyncConfig, sync_platform};
use tracing::info;

use crate::ui::{ConsoleReporter, format_size};
use crate::{GlobalArgs, VersionArgs};

/// Options of the `sync` subcommand.
#[derive(Debug)]
pub struct SyncOptions<'a> {
    pub version: &'a VersionArgs,
    pub output: &'a Path,
    pub concurrency: usize,
    pub retries: u32,
    pub retry_delay: Duration,
    pub verify: bool,
}

pub async fn sync(global: &GlobalArgs, opts: SyncOptions<'_>) -> Result<()> {
    let start = Instant::now();
    let client = super::client(global)?;
    let reporter = Arc::new(ConsoleReporter::new(global.quiet));

    let version = super::resolve_version(&client, global, opts.version, reporter.as_ref()).await?;
    let skip = if opts.verify {
        SkipPolicy::VerifyHash
    } else {
        SkipPolicy::Exists
    };
    let config = SyncConfig::new(&global.release, &version, opts.output)
        .with_concurrency(opts.concurrency)
        .with_retry(RetryPolicy::new(opts.retries, opts.retry_delay))
        .with_skip_policy(skip);
    info!(?config, "Starting sync");

    let mut failed = 0;
    let mut written = 0;
    let mut bytes = 0;
    for platform in &global.platforms {
        let reporter: Arc<dyn Reporter> = reporter.clone();
        let result = sync_platform(&client, &config, platform, reporter)
            .await
            .with_context(|| format!("Failed to sync {platform}"))?;
        failed += result.failed;
        written += result.completed;
        bytes += result.bytes;
    }

    if !global.quiet {
        eprintln!(
            "{} {written} files ({}) in {:.1}s",
            "Done".green().bold(),
            format_size(bytes),
            start.elapsed().as_secs_f64()
        );
    }
    if failed > 0 {
        bail!("{failed} files failed");
    }
    Ok(())
}
