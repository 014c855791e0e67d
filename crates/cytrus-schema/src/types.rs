//! Owned release data model produced by the manifest decoder.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::hash::ContentHash;

/// A chunk reference as declared on a file.
///
/// `offset` is carried from the manifest but reconstruction does not use it:
/// chunks are written in declaration order at a running cursor, so a file is
/// only correct if its chunks are declared in byte order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRef {
    /// Content hash of the chunk.
    pub hash: ContentHash,
    /// Size of the chunk in bytes.
    pub size: u64,
    /// Declared position of the chunk inside the file.
    pub offset: u64,
}

/// A file of the release, described as an ordered list of chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Slash-delimited path relative to the platform output directory.
    pub name: String,
    /// Total size of the file in bytes.
    pub size: u64,
    /// Content hash of the whole file.
    pub hash: ContentHash,
    /// Whether the file must be marked executable once written.
    pub executable: bool,
    /// Chunks making up the file, in byte order.
    pub chunks: Vec<ChunkRef>,
}

/// Byte range of one chunk inside a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleChunk {
    /// Length of the chunk in bytes.
    pub size: u64,
    /// Start of the chunk inside the bundle blob.
    pub offset: u64,
}

/// A downloadable blob on the CDN packing many chunks contiguously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleEntry {
    /// Content hash of the bundle, also its CDN blob name.
    pub hash: ContentHash,
    /// Chunks held by this bundle keyed by chunk hash.
    pub chunks: HashMap<ContentHash, BundleChunk>,
}

/// Named grouping of files and bundles inside a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Fragment name (e.g. "main", "configuration").
    pub name: String,
    /// Files declared by this fragment.
    pub files: Vec<FileEntry>,
    /// Bundles declared by this fragment.
    pub bundles: Vec<BundleEntry>,
}

/// Per-fragment counts retained after decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentSummary {
    /// Fragment name.
    pub name: String,
    /// Number of files decoded from the fragment.
    pub files: usize,
    /// Number of bundles decoded from the fragment.
    pub bundles: usize,
}
