//! Per-platform sync: fetch the manifest, index its bundles, then hand the
//! file list to the scheduler.

use std::sync::Arc;

use cytrus_schema::ReleaseManifest;
use cytrus_schema::manifest::{self, ManifestError};
use thiserror::Error;
use tracing::info;

use crate::config::SyncConfig;
use crate::index::ChunkIndex;
use crate::io::cdn::CdnClient;
use crate::io::fetch::{BundleSource, FetchError};
use crate::probe::ProbeError;
use crate::reconstruct::Reconstructor;
use crate::reporter::Reporter;
use crate::scheduler::{RunResult, Scheduler};

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Manifest download failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Manifest is invalid: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Version discovery failed: {0}")]
    Probe(#[from] ProbeError),
}

/// Fetch and decode the manifest for `platform`, then reconstruct it.
///
/// # Errors
///
/// Fails only when the manifest cannot be fetched or decoded. Per-file
/// failures are reported in the returned [`RunResult`].
pub async fn sync_platform(
    client: &CdnClient,
    config: &SyncConfig,
    platform: &str,
    reporter: Arc<dyn Reporter>,
) -> Result<RunResult, SyncError> {
    reporter.platform_started(platform);
    let bytes = client
        .fetch_manifest(&config.release, platform, &config.version)
        .await?;
    let manifest = manifest::decode(&bytes)?;
    info!(
        platform,
        version = %config.version,
        fragments = manifest.fragments.len(),
        files = manifest.files.len(),
        bundles = manifest.bundles.len(),
        "Manifest loaded"
    );

    let source: Arc<dyn BundleSource> = Arc::new(client.clone());
    Ok(sync_manifest(source, &manifest, config, platform, reporter).await)
}

/// Reconstruct an already decoded manifest into the platform directory.
pub async fn sync_manifest(
    source: Arc<dyn BundleSource>,
    manifest: &ReleaseManifest,
    config: &SyncConfig,
    platform: &str,
    reporter: Arc<dyn Reporter>,
) -> RunResult {
    reporter.manifest_loaded(manifest.files.len(), manifest.bundles.len());

    let index = Arc::new(ChunkIndex::build(&manifest.bundles));
    let reconstructor = Reconstructor::new(source, index, config.retry);
    let scheduler = Scheduler::new(reconstructor, config.concurrency, config.skip, reporter.clone());

    let result = scheduler
        .run(&manifest.files, &config.platform_dir(platform))
        .await;

    info!(
        platform,
        completed = result.completed,
        skipped = result.skipped,
        failed = result.failed,
        bytes = result.bytes,
        "Platform finished"
    );
    reporter.platform_finished(platform, &result);
    result
}
