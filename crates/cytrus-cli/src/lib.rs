//! cytrus - rebuild game releases from a chunked CDN
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Downloads a release manifest for each platform, then rebuilds every file
//! it lists from byte ranges of content-addressed bundles.
//!
//! # Output Layout
//!
//! ```text
//! {output}/
//! └── {version}/
//!     ├── windows/
//!     └── darwin/
//! ```

pub mod cmd;
pub mod ui;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cytrus_core::config::{DEFAULT_CDN_BASE, DEFAULT_CONCURRENCY};

#[derive(Debug, Parser)]
#[command(name = "cytrus")]
#[command(author, version, about = "cytrus - rebuild game releases from a chunked CDN")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// CDN base URL
    #[arg(long, global = true, env = "CYTRUS_CDN", default_value = DEFAULT_CDN_BASE)]
    pub cdn: String,

    /// Game identifier
    #[arg(long, global = true, env = "GAME", default_value = "dofus")]
    pub game: String,

    /// Release channel
    #[arg(long, global = true, env = "RELEASE", default_value = "main")]
    pub release: String,

    /// Comma-separated list of platforms
    #[arg(
        long,
        global = true,
        env = "PLATFORMS",
        default_value = "windows",
        value_delimiter = ','
    )]
    pub platforms: Vec<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// How the release version is chosen.
#[derive(Debug, Clone, Args)]
pub struct VersionArgs {
    /// Version prefix to probe, e.g. 2.70
    #[arg(long, env = "VERSION", default_value = "2.70")]
    pub version_prefix: String,

    /// Use this exact version instead of probing
    #[arg(long)]
    pub pin: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download and rebuild a release
    Sync {
        #[command(flatten)]
        version: VersionArgs,

        /// Output root directory
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Maximum number of files rebuilt at once
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Attempts per chunk request
        #[arg(long, default_value_t = 3)]
        retries: u32,

        /// Base retry delay in milliseconds (multiplied by the attempt number)
        #[arg(long, default_value_t = 1000)]
        retry_delay_ms: u64,

        /// Skip existing files only if their SHA-1 matches the manifest
        #[arg(long)]
        verify: bool,
    },
    /// Find the latest published version
    Probe {
        #[command(flatten)]
        version: VersionArgs,
    },
    /// Summarize a manifest
    Inspect {
        #[command(flatten)]
        version: VersionArgs,

        /// Read the manifest from a local file instead of the CDN
        #[arg(long)]
        file: Option<PathBuf>,

        /// Print the decoded file list as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sync_with_defaults() {
        let cli = Cli::try_parse_from(["cytrus", "sync"]).unwrap();
        assert_eq!(cli.global.game, "dofus");
        assert_eq!(cli.global.platforms, vec!["windows".to_string()]);
        match cli.command {
            Commands::Sync {
                concurrency,
                retries,
                verify,
                ..
            } => {
                assert_eq!(concurrency, 30);
                assert_eq!(retries, 3);
                assert!(!verify);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn splits_platform_list() {
        let cli = Cli::try_parse_from([
            "cytrus",
            "--platforms",
            "windows,darwin,linux",
            "probe",
            "--pin",
            "6.0_2.70.1.1",
        ])
        .unwrap();
        assert_eq!(cli.global.platforms, ["windows", "darwin", "linux"]);
        match cli.command {
            Commands::Probe { version } => assert_eq!(version.pin.as_deref(), Some("6.0_2.70.1.1")),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
