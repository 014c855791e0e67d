//! Summarize a release manifest.

use std::path::Path;

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use cytrus_schema::ReleaseManifest;
use cytrus_schema::manifest;

use crate::ui::{ConsoleReporter, format_size};
use crate::{GlobalArgs, VersionArgs};

pub async fn inspect(
    global: &GlobalArgs,
    version: &VersionArgs,
    file: Option<&Path>,
    json: bool,
) -> Result<()> {
    let bytes = if let Some(path) = file {
        tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        let client = super::client(global)?;
        let reporter = ConsoleReporter::new(true);
        let resolved = super::resolve_version(&client, global, version, &reporter).await?;
        let platform = super::primary_platform(global)?;
        client
            .fetch_manifest(&global.release, platform, &resolved)
            .await
            .with_context(|| format!("Failed to fetch manifest {resolved} for {platform}"))?
            .to_vec()
    };

    let manifest = manifest::decode(&bytes).context("Failed to decode manifest")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&manifest.files)?);
    } else {
        print_summary(&manifest);
    }
    Ok(())
}

fn print_summary(manifest: &ReleaseManifest) {
    for fragment in &manifest.fragments {
        println!(
            "  {} {:>7} files {:>7} bundles",
            format!("{:<24}", fragment.name).cyan(),
            fragment.files,
            fragment.bundles
        );
    }
    let executables = manifest.files.iter().filter(|f| f.executable).count();
    println!(
        "{} {} files ({} executable), {} bundles, {} chunks, {}",
        "Total".bold(),
        manifest.files.len(),
        executables,
        manifest.bundles.len(),
        manifest.bundle_chunk_count(),
        format_size(manifest.total_size())
    );
}
