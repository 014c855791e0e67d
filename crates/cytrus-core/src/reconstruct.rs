//! File reconstruction from bundle ranges.
//!
//! A file is assembled entirely in memory, chunk by chunk in declared order,
//! and only touches the disk once every chunk has arrived.

use std::path::Path;
use std::sync::Arc;

use cytrus_schema::{ContentHash, FileEntry};
use thiserror::Error;
use tracing::{debug, warn};

use crate::index::ChunkIndex;
use crate::io::fetch::{BundleSource, FetchError};
use crate::io::output;
use crate::retry::{RetryPolicy, with_retry};

#[derive(Error, Debug)]
pub enum ReconstructError {
    #[error("Chunk {chunk} is not in any bundle")]
    MissingChunk { chunk: ContentHash },

    #[error("Chunk {chunk} from bundle {bundle} failed after {attempts} attempts: {source}")]
    Fetch {
        chunk: ContentHash,
        bundle: ContentHash,
        attempts: u32,
        #[source]
        source: FetchError,
    },

    #[error("Chunk {chunk} overflows the file: {end} > {size} bytes")]
    Overflow {
        chunk: ContentHash,
        end: u64,
        size: u64,
    },

    #[error("File size {size} does not fit in memory")]
    TooLarge { size: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rebuilds files from a [`BundleSource`] using a shared [`ChunkIndex`].
#[derive(Clone)]
pub struct Reconstructor {
    source: Arc<dyn BundleSource>,
    index: Arc<ChunkIndex>,
    retry: RetryPolicy,
}

impl std::fmt::Debug for Reconstructor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconstructor")
            .field("chunks", &self.index.len())
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl Reconstructor {
    pub fn new(source: Arc<dyn BundleSource>, index: Arc<ChunkIndex>, retry: RetryPolicy) -> Self {
        Self {
            source,
            index,
            retry,
        }
    }

    /// Assemble `file` and write it to `dest`.
    ///
    /// Chunks are laid out back to back from offset 0 in declared order; the
    /// offset recorded on each chunk reference is not used. Returns the
    /// number of bytes written, which is always `file.size`.
    ///
    /// Every chunk is located and the layout checked against `file.size`
    /// before the buffer is allocated or anything is fetched.
    ///
    /// # Errors
    ///
    /// Any chunk failure aborts the file before anything is written.
    pub async fn reconstruct(&self, file: &FileEntry, dest: &Path) -> Result<u64, ReconstructError> {
        if let Some(chunk) = self.index.unresolved(file).first() {
            return Err(ReconstructError::MissingChunk {
                chunk: (*chunk).clone(),
            });
        }

        let mut plan = Vec::with_capacity(file.chunks.len());
        let mut end: u64 = 0;
        for chunk in &file.chunks {
            let Some(location) = self.index.locate(&chunk.hash) else {
                return Err(ReconstructError::MissingChunk {
                    chunk: chunk.hash.clone(),
                });
            };
            let Some(range) = location.range() else {
                debug!(file = %file.name, chunk = %chunk.hash, "Empty chunk, nothing to fetch");
                continue;
            };
            end = end.saturating_add(range.len());
            if end > file.size {
                return Err(ReconstructError::Overflow {
                    chunk: chunk.hash.clone(),
                    end,
                    size: file.size,
                });
            }
            plan.push((chunk, location, range));
        }

        let size = usize::try_from(file.size).map_err(|_| ReconstructError::TooLarge { size: file.size })?;
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(size)
            .map_err(|_| ReconstructError::TooLarge { size: file.size })?;
        buffer.resize(size, 0u8);

        let mut cursor: usize = 0;
        for (chunk, location, range) in plan {
            let source = &self.source;
            let (bytes, attempts) = with_retry(&self.retry, |attempt| async move {
                debug!(
                    bundle = %location.bundle,
                    range = %range.header_value(),
                    attempt,
                    "Fetching chunk"
                );
                let bytes = source.fetch_range(&location.bundle, range).await?;
                if bytes.len() as u64 != range.len() {
                    return Err(FetchError::Length {
                        url: location.bundle.to_string(),
                        expected: range.len(),
                        actual: bytes.len() as u64,
                    });
                }
                Ok(bytes)
            })
            .await
            .map_err(|e| ReconstructError::Fetch {
                chunk: chunk.hash.clone(),
                bundle: location.bundle.clone(),
                attempts: e.attempts,
                source: e.last,
            })?;

            if attempts > 1 {
                debug!(chunk = %chunk.hash, attempts, "Chunk recovered after retries");
            }

            // The planned layout fits in `size` and each body matches its range.
            let next = cursor + bytes.len();
            buffer[cursor..next].copy_from_slice(&bytes);
            cursor = next;
        }

        let cursor = cursor as u64;
        if cursor < file.size {
            warn!(
                file = %file.name,
                expected = file.size,
                actual = cursor,
                "Chunks cover less than the declared size; tail left zero-filled"
            );
        }

        output::write_atomic(dest, buffer, file.executable).await?;
        Ok(file.size)
    }
}
