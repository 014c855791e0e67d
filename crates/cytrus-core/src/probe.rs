//! Release version discovery.
//!
//! Versions look like `6.0_{prefix}.{major}.{minor}`. Candidates are walked
//! from the newest plausible version downwards and the first manifest that
//! exists wins.

use thiserror::Error;
use tracing::{debug, info};

use crate::io::cdn::CdnClient;
use crate::reporter::Reporter;

/// Highest major version tried.
pub const START_MAJOR: u32 = 12;

/// Highest minor version tried for every major.
pub const MAX_MINOR: u32 = 31;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("No release found for prefix {prefix} after {tried} candidates")]
    NotFound { prefix: String, tried: usize },
}

/// Descending sequence of candidate version strings.
#[derive(Debug, Clone)]
pub struct VersionCandidates {
    prefix: String,
    next: Option<(u32, u32)>,
}

impl VersionCandidates {
    /// Candidates for `prefix` from `12.31` down to `0.0`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, START_MAJOR, MAX_MINOR)
    }

    /// Candidates from `major.minor` down to `0.0`.
    pub fn starting_at(prefix: impl Into<String>, major: u32, minor: u32) -> Self {
        Self {
            prefix: prefix.into(),
            next: Some((major, minor.min(MAX_MINOR))),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Iterator for VersionCandidates {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let (major, minor) = self.next?;
        self.next = match (major, minor) {
            (0, 0) => None,
            (major, 0) => Some((major - 1, MAX_MINOR)),
            (major, minor) => Some((major, minor - 1)),
        };
        Some(format!("6.0_{}.{major}.{minor}", self.prefix))
    }
}

/// Find the newest version whose manifest exists for `platform`.
///
/// # Errors
///
/// Returns [`ProbeError::NotFound`] when every candidate is missing.
pub async fn discover_version(
    client: &CdnClient,
    release: &str,
    platform: &str,
    candidates: VersionCandidates,
    reporter: &dyn Reporter,
) -> Result<String, ProbeError> {
    let prefix = candidates.prefix().to_string();
    let mut tried = 0;
    for candidate in candidates {
        tried += 1;
        reporter.probing(&candidate);
        if client.manifest_exists(release, platform, &candidate).await {
            info!(version = %candidate, tried, "Found release");
            reporter.version_found(&candidate);
            return Ok(candidate);
        }
        debug!(version = %candidate, "Not published");
    }
    Err(ProbeError::NotFound { prefix, tried })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::NullReporter;
    use mockito::{Matcher, Server};

    #[test]
    fn candidates_descend_and_wrap() {
        let got: Vec<_> = VersionCandidates::starting_at("2.70", 1, 1).collect();
        assert_eq!(
            got[..4],
            [
                "6.0_2.70.1.1".to_string(),
                "6.0_2.70.1.0".to_string(),
                "6.0_2.70.0.31".to_string(),
                "6.0_2.70.0.30".to_string(),
            ]
        );
        assert_eq!(got.len(), 2 + 32);
        assert_eq!(got.last().map(String::as_str), Some("6.0_2.70.0.0"));
    }

    #[test]
    fn default_start_is_12_31() {
        let mut it = VersionCandidates::new("2.70");
        assert_eq!(it.next().as_deref(), Some("6.0_2.70.12.31"));
        assert_eq!(it.next().as_deref(), Some("6.0_2.70.12.30"));
        assert_eq!(VersionCandidates::new("x").count(), 13 * 32);
    }

    #[tokio::test]
    async fn finds_first_published_version() {
        let mut server = Server::new_async().await;
        let _found = server
            .mock("HEAD", "/dofus/releases/main/windows/6.0_2.70.12.29.manifest")
            .with_status(200)
            .create_async()
            .await;
        let _other = server
            .mock("HEAD", Matcher::Regex(r"12\.3[01]\.manifest$".to_string()))
            .with_status(404)
            .expect(2)
            .create_async()
            .await;

        let client = CdnClient::with_client(reqwest::Client::new(), &server.url(), "dofus");
        let version = discover_version(
            &client,
            "main",
            "windows",
            VersionCandidates::new("2.70"),
            &NullReporter,
        )
        .await
        .unwrap();

        assert_eq!(version, "6.0_2.70.12.29");
    }

    #[tokio::test]
    async fn exhausted_candidates_are_an_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("HEAD", Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let client = CdnClient::with_client(reqwest::Client::new(), &server.url(), "dofus");
        let err = discover_version(
            &client,
            "main",
            "windows",
            VersionCandidates::starting_at("2.70", 0, 2),
            &NullReporter,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ProbeError::NotFound { tried: 3, .. }));
    }
}
