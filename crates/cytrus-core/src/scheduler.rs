//! Bounded-concurrency download scheduler.
//!
//! One task per file, gated by a semaphore whose permit is taken before the
//! task is spawned, so submission stalls once the limit is reached. A failed
//! file never cancels its siblings; outcomes are tallied into a [`RunResult`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use cytrus_schema::FileEntry;
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::SkipPolicy;
use crate::io::output;
use crate::paths;
use crate::reconstruct::Reconstructor;
use crate::reporter::Reporter;

/// A file that could not be produced, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub file: String,
    pub reason: String,
}

/// Outcome of one scheduler run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunResult {
    /// Files listed in the manifest.
    pub total: usize,
    /// Files already up to date on disk.
    pub skipped: usize,
    /// Files written by this run.
    pub completed: usize,
    /// Files that failed.
    pub failed: usize,
    /// Bytes written by this run.
    pub bytes: u64,
    pub failures: Vec<FileFailure>,
}

impl RunResult {
    /// `true` when no file failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

#[derive(Default)]
struct Tally {
    skipped: AtomicUsize,
    completed: AtomicUsize,
    failed: AtomicUsize,
    bytes: AtomicU64,
}

/// Runs reconstructions with at most `concurrency` files in flight.
#[derive(Clone)]
pub struct Scheduler {
    reconstructor: Reconstructor,
    concurrency: usize,
    skip: SkipPolicy,
    reporter: Arc<dyn Reporter>,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("reconstructor", &self.reconstructor)
            .field("concurrency", &self.concurrency)
            .field("skip", &self.skip)
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    pub fn new(
        reconstructor: Reconstructor,
        concurrency: usize,
        skip: SkipPolicy,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            reconstructor,
            concurrency: concurrency.max(1),
            skip,
            reporter,
        }
    }

    /// Reconstruct every file of `files` that is not already present under
    /// `platform_dir`.
    pub async fn run(&self, files: &[FileEntry], platform_dir: &Path) -> RunResult {
        let mut result = RunResult {
            total: files.len(),
            ..RunResult::default()
        };

        // Existence is checked up front; hashing an existing file is left to
        // the bounded tasks.
        let mut pending: Vec<(FileEntry, PathBuf, bool)> = Vec::new();
        for file in files {
            let dest = match paths::destination(platform_dir, &file.name) {
                Ok(dest) => dest,
                Err(reason) => {
                    warn!(file = %file.name, "Rejected file name: {reason}");
                    self.reporter.file_failed(&file.name, &reason);
                    result.failed += 1;
                    result.failures.push(FileFailure {
                        file: file.name.clone(),
                        reason,
                    });
                    continue;
                }
            };
            let exists = tokio::fs::try_exists(&dest).await.unwrap_or(false);
            match (exists, self.skip) {
                (true, SkipPolicy::Exists) => result.skipped += 1,
                (true, SkipPolicy::VerifyHash) => pending.push((file.clone(), dest, true)),
                (false, _) => pending.push((file.clone(), dest, false)),
            }
        }

        self.reporter.files_queued(pending.len(), result.skipped);
        if pending.is_empty() {
            debug!("Nothing to download");
            return result;
        }
        info!(
            pending = pending.len(),
            skipped = result.skipped,
            concurrency = self.concurrency,
            "Reconstructing files"
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let tally = Arc::new(Tally::default());
        let mut set: JoinSet<Option<FileFailure>> = JoinSet::new();
        let mut names = HashMap::new();

        for (file, dest, verify) in pending {
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                break;
            };
            let reconstructor = self.reconstructor.clone();
            let reporter = self.reporter.clone();
            let tally = tally.clone();
            let name = file.name.clone();

            let handle = set.spawn(async move {
                let _permit = permit;
                if verify && matches_on_disk(&file, &dest).await {
                    tally.skipped.fetch_add(1, Ordering::Relaxed);
                    reporter.file_skipped(&file.name);
                    return None;
                }
                match reconstructor.reconstruct(&file, &dest).await {
                    Ok(bytes) => {
                        tally.completed.fetch_add(1, Ordering::Relaxed);
                        tally.bytes.fetch_add(bytes, Ordering::Relaxed);
                        reporter.file_done(&file.name, bytes);
                        None
                    }
                    Err(e) => {
                        let reason = e.to_string();
                        warn!(file = %file.name, "Reconstruction failed: {reason}");
                        tally.failed.fetch_add(1, Ordering::Relaxed);
                        reporter.file_failed(&file.name, &reason);
                        Some(FileFailure {
                            file: file.name,
                            reason,
                        })
                    }
                }
            });
            names.insert(handle.id(), name);
        }

        while let Some(joined) = set.join_next_with_id().await {
            match joined {
                Ok((_, None)) => {}
                Ok((_, Some(failure))) => result.failures.push(failure),
                Err(e) => {
                    let file = names.remove(&e.id()).unwrap_or_default();
                    let reason = format!("Internal error: {e}");
                    self.reporter.file_failed(&file, &reason);
                    tally.failed.fetch_add(1, Ordering::Relaxed);
                    result.failures.push(FileFailure { file, reason });
                }
            }
        }

        result.completed = tally.completed.load(Ordering::Relaxed);
        result.failed += tally.failed.load(Ordering::Relaxed);
        result.bytes = tally.bytes.load(Ordering::Relaxed);
        result.skipped += tally.skipped.load(Ordering::Relaxed);
        result
    }
}

/// Whether the existing file at `dest` hashes to the manifest hash.
async fn matches_on_disk(file: &FileEntry, dest: &Path) -> bool {
    match output::matches_hash(dest, &file.hash).await {
        Ok(true) => true,
        Ok(false) => {
            debug!(file = %file.name, "Hash mismatch, rebuilding");
            false
        }
        Err(e) => {
            debug!(file = %file.name, "Could not hash existing file: {e}");
            false
        }
    }
}
