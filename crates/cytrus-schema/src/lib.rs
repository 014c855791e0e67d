//! Shared types and wire format for cytrus.
//!
//! A release is described by a binary manifest listing every file, the
//! content-addressed chunks each file is made of, and the bundles on the CDN
//! that physically hold those chunks. This crate owns the data model and the
//! manifest codec; it performs no I/O.

pub mod hash;
pub mod manifest;
pub mod types;

// Re-exports
pub use hash::*;
pub use manifest::{ManifestError, ReleaseManifest};
pub use types::*;
