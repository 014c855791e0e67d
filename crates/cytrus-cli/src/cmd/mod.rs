pub mod inspect;
pub mod probe;
pub mod sync;

use std::time::Duration;

use anyhow::{Context, Result};
use cytrus_core::{CdnClient, CdnConfig, Reporter, VersionCandidates, discover_version};

use crate::{GlobalArgs, VersionArgs};

/// Build a CDN client from the global options.
pub fn client(global: &GlobalArgs) -> Result<CdnClient> {
    let config = CdnConfig::new(&global.game)
        .with_base_url(&global.cdn)
        .with_request_timeout(Duration::from_secs(global.timeout_secs));
    CdnClient::new(&config).context("Failed to build HTTP client")
}

/// First platform from `--platforms`.
pub fn primary_platform(global: &GlobalArgs) -> Result<&str> {
    global
        .platforms
        .first()
        .map(String::as_str)
        .context("No platform given")
}

/// Pinned version, or the newest one published for the first platform.
pub async fn resolve_version(
    client: &CdnClient,
    global: &GlobalArgs,
    version: &VersionArgs,
    reporter: &dyn Reporter,
) -> Result<String> {
    if let Some(pin) = &version.pin {
        return Ok(pin.clone());
    }
    let platform = primary_platform(global)?;
    let found = discover_version(
        client,
        &global.release,
        platform,
        VersionCandidates::new(&version.version_prefix),
        reporter,
    )
    .await?;
    Ok(found)
}
