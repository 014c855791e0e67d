//! Core library for cytrus.
//!
//! Turns a decoded release manifest into files on disk:
//!
//! - [`index`] maps every chunk hash to the bundle and byte range holding it.
//! - [`io`] fetches byte ranges of bundles from the CDN and writes outputs.
//! - [`reconstruct`] assembles one file from its chunks, all or nothing.
//! - [`scheduler`] runs reconstructions under a bounded concurrency limit.
//! - [`probe`] discovers the current release version.
//! - [`sync`] ties it together for one platform.
//!
//! # Output Layout
//!
//! ```text
//! {output}/
//! └── {version}/
//!     └── {platform}/
//!         └── {file name from manifest}
//! ```

pub mod config;
pub mod index;
pub mod io;
pub mod paths;
pub mod probe;
pub mod reconstruct;
pub mod reporter;
pub mod retry;
pub mod scheduler;
pub mod sync;

pub use config::{CdnConfig, SkipPolicy, SyncConfig};
pub use index::{ChunkIndex, ChunkLocation};
pub use io::cdn::CdnClient;
pub use io::fetch::{BundleSource, ByteRange, FetchError};
pub use probe::{ProbeError, VersionCandidates, discover_version};
pub use reconstruct::{ReconstructError, Reconstructor};
pub use reporter::{NullReporter, Reporter};
pub use retry::{RetryDecision, RetryPolicy};
pub use scheduler::{FileFailure, RunResult, Scheduler};
pub use sync::{SyncError, sync_manifest, sync_platform};

/// User Agent string for CDN requests
pub const USER_AGENT: &str = concat!("cytrus/", env!("CARGO_PKG_VERSION"));
