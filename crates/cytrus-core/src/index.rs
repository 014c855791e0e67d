//! Chunk locator: chunk hash → bundle and byte range.
//!
//! Built once per manifest and shared read-only (behind an `Arc`) by every
//! reconstruction task, so lookups need no locking.

use std::collections::HashMap;

use cytrus_schema::{BundleEntry, ContentHash, FileEntry};

use crate::io::fetch::ByteRange;

/// Physical location of a chunk inside a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkLocation {
    /// Bundle holding the chunk.
    pub bundle: ContentHash,
    /// Start of the chunk inside the bundle.
    pub offset: u64,
    /// Length of the chunk in bytes.
    pub size: u64,
}

impl ChunkLocation {
    /// Inclusive byte range to request, or `None` for an empty chunk.
    pub fn range(&self) -> Option<ByteRange> {
        ByteRange::from_offset(self.offset, self.size)
    }
}

/// Index of every chunk held by any bundle of a manifest.
#[derive(Debug, Clone, Default)]
pub struct ChunkIndex {
    locations: HashMap<ContentHash, ChunkLocation>,
}

impl ChunkIndex {
    /// Build the index in one pass over all bundles.
    ///
    /// If a chunk hash appears in more than one bundle the last one wins.
    pub fn build<'a>(bundles: impl IntoIterator<Item = &'a BundleEntry>) -> Self {
        let mut locations = HashMap::new();
        for bundle in bundles {
            for (hash, chunk) in &bundle.chunks {
                locations.insert(
                    hash.clone(),
                    ChunkLocation {
                        bundle: bundle.hash.clone(),
                        offset: chunk.offset,
                        size: chunk.size,
                    },
                );
            }
        }
        Self { locations }
    }

    /// Look up where a chunk lives.
    pub fn locate(&self, chunk: &ContentHash) -> Option<&ChunkLocation> {
        self.locations.get(chunk)
    }

    /// Chunks of `file` that no bundle holds, in declaration order.
    pub fn unresolved<'a>(&self, file: &'a FileEntry) -> Vec<&'a ContentHash> {
        file.chunks
            .iter()
            .map(|c| &c.hash)
            .filter(|h| !self.locations.contains_key(*h))
            .collect()
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
