//! Range fetching of bundle bytes.
//!
//! [`BundleSource`] is the seam between reconstruction and the network: the
//! CDN client implements it over HTTP, tests implement it in memory.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use cytrus_schema::ContentHash;
use thiserror::Error;

/// Errors from a single fetch attempt. All of them are treated as transient.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected {expected} bytes from {url}, got {actual}")]
    Length {
        url: String,
        expected: u64,
        actual: u64,
    },
}

/// Inclusive byte range, as sent in a `Range` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Range covering `size` bytes from `offset`; `None` when `size` is 0.
    pub fn from_offset(offset: u64, size: u64) -> Option<Self> {
        let last = size.checked_sub(1)?;
        Some(Self {
            start: offset,
            end: offset.saturating_add(last),
        })
    }

    /// Number of bytes covered.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// A range always covers at least one byte.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `Range` header value: `bytes={start}-{end}`.
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

/// Something that can return a byte range of a bundle.
#[async_trait]
pub trait BundleSource: Send + Sync {
    /// Fetch exactly `range` from `bundle`.
    async fn fetch_range(&self, bundle: &ContentHash, range: ByteRange) -> Result<Bytes, FetchError>;
}

#[async_trait]
impl<T: BundleSource + ?Sized> BundleSource for Arc<T> {
    async fn fetch_range(&self, bundle: &ContentHash, range: ByteRange) -> Result<Bytes, FetchError> {
        (**self).fetch_range(bundle, range).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_len() {
        let range = ByteRange::from_offset(0, 4).unwrap();
        assert_eq!(range.header_value(), "bytes=0-3");
        assert_eq!(range.len(), 4);

        let range = ByteRange::from_offset(1000, 1).unwrap();
        assert_eq!(range.header_value(), "bytes=1000-1000");
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn empty_range_is_none() {
        assert_eq!(ByteRange::from_offset(10, 0), None);
    }
}
