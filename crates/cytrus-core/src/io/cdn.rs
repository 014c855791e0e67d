//! HTTP client for the release CDN.
//!
//! Handles manifest existence probes and downloads, and range requests
//! against content-addressed bundles.

use async_trait::async_trait;
use bytes::Bytes;
use cytrus_schema::ContentHash;
use reqwest::Client;
use tracing::debug;

use crate::config::CdnConfig;
use crate::io::fetch::{BundleSource, ByteRange, FetchError};
use crate::paths;

/// CDN client bound to one base URL and game.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CdnClient {
    http: Client,
    base_url: String,
    game: String,
}

impl CdnClient {
    /// Build a client with the configured per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed (e.g. the
    /// TLS backend fails to initialize).
    pub fn new(config: &CdnConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(crate::USER_AGENT)
            .build()?;
        Ok(Self::with_client(http, &config.base_url, &config.game))
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: Client, base_url: &str, game: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            game: game.to_string(),
        }
    }

    /// URL of a release manifest.
    pub fn manifest_url(&self, release: &str, platform: &str, version: &str) -> String {
        paths::manifest_url(&self.base_url, &self.game, release, platform, version)
    }

    /// URL of a bundle blob.
    pub fn bundle_url(&self, bundle: &ContentHash) -> String {
        paths::bundle_url(&self.base_url, &self.game, bundle)
    }

    /// Check whether a manifest exists with a `HEAD` request.
    ///
    /// Transport errors count as "does not exist".
    pub async fn manifest_exists(&self, release: &str, platform: &str, version: &str) -> bool {
        let url = self.manifest_url(release, platform, version);
        match self.http.head(&url).send().await {
            Ok(resp) => {
                debug!(%url, status = resp.status().as_u16(), "Manifest probe");
                resp.status().is_success()
            }
            Err(e) => {
                debug!(%url, "Manifest probe failed: {e}");
                false
            }
        }
    }

    /// Download a manifest.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] on transport failure and
    /// [`FetchError::Status`] on a non-success response.
    pub async fn fetch_manifest(
        &self,
        release: &str,
        platform: &str,
        version: &str,
    ) -> Result<Bytes, FetchError> {
        let url = self.manifest_url(release, platform, version);
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.bytes().await?)
    }
}

#[async_trait]
impl BundleSource for CdnClient {
    async fn fetch_range(&self, bundle: &ContentHash, range: ByteRange) -> Result<Bytes, FetchError> {
        let url = self.bundle_url(bundle);
        let resp = self
            .http
            .get(&url)
            .header(reqwest::header::RANGE, range.header_value())
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: resp.status().as_u16(),
            });
        }

        let body = resp.bytes().await?;
        if body.len() as u64 != range.len() {
            return Err(FetchError::Length {
                url,
                expected: range.len(),
                actual: body.len() as u64,
            });
        }
        Ok(body)
    }
}
