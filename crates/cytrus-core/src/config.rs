//! Immutable run configuration.
//!
//! Built once by the caller (after version discovery) and passed by reference
//! into every entry point. Nothing in the core reads ambient state.

use std::path::PathBuf;
use std::time::Duration;

use crate::paths;
use crate::retry::RetryPolicy;

/// Default CDN serving manifests and bundles.
pub const DEFAULT_CDN_BASE: &str = "https://cytrus.cdn.ankama.com";

/// Default number of files reconstructed concurrently.
pub const DEFAULT_CONCURRENCY: usize = 30;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Where and how to reach the CDN.
#[derive(Debug, Clone)]
pub struct CdnConfig {
    /// Base URL, e.g. `https://cytrus.cdn.ankama.com`.
    pub base_url: String,
    /// Game identifier, the first path segment on the CDN.
    pub game: String,
    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
}

impl CdnConfig {
    /// Configuration for `game` on the default CDN.
    pub fn new(game: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_CDN_BASE.to_string(),
            game: game.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the CDN base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// How the scheduler decides that an existing output file is up to date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SkipPolicy {
    /// Skip any file whose destination path exists.
    #[default]
    Exists,
    /// Skip only when the existing file's SHA-1 matches the manifest hash.
    VerifyHash,
}

/// Everything one platform sync needs besides the platform name.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Release channel, e.g. `main`.
    pub release: String,
    /// Resolved release version.
    pub version: String,
    /// Root under which `{version}/{platform}` directories are created.
    pub output_root: PathBuf,
    /// Maximum number of files reconstructed at once.
    pub concurrency: usize,
    /// Retry policy for chunk range requests.
    pub retry: RetryPolicy,
    /// Incremental sync policy.
    pub skip: SkipPolicy,
}

impl SyncConfig {
    /// Configuration with default concurrency, retry and skip policies.
    pub fn new(
        release: impl Into<String>,
        version: impl Into<String>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            release: release.into(),
            version: version.into(),
            output_root: output_root.into(),
            concurrency: DEFAULT_CONCURRENCY,
            retry: RetryPolicy::default(),
            skip: SkipPolicy::default(),
        }
    }

    /// Override the concurrency limit (at least 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Override the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Override the skip policy.
    pub fn with_skip_policy(mut self, skip: SkipPolicy) -> Self {
        self.skip = skip;
        self
    }

    /// Output directory for one platform: `{output_root}/{version}/{platform}`.
    pub fn platform_dir(&self, platform: &str) -> PathBuf {
        paths::platform_dir(&self.output_root, &self.version, platform)
    }
}
