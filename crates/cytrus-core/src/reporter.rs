//! Reporter trait for dependency injection
//!
//! Core logic reports progress through this trait so it stays independent of
//! any particular console or UI.

use crate::scheduler::RunResult;

pub trait Reporter: Send + Sync {
    /// A version probe is about to test `candidate`.
    fn probing(&self, candidate: &str);

    /// Version discovery settled on `version`.
    fn version_found(&self, version: &str);

    /// Work on `platform` has started.
    fn platform_started(&self, platform: &str);

    /// The platform's manifest was decoded.
    fn manifest_loaded(&self, files: usize, bundles: usize);

    /// Files were split into `pending` work and `skipped` up-to-date ones.
    fn files_queued(&self, pending: usize, skipped: usize);

    /// A file was written successfully.
    fn file_done(&self, name: &str, bytes: u64);

    /// An existing file turned out to be up to date after hashing it.
    fn file_skipped(&self, name: &str);

    /// A file could not be reconstructed.
    fn file_failed(&self, name: &str, reason: &str);

    /// Work on `platform` ended.
    fn platform_finished(&self, platform: &str, result: &RunResult);
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn probing(&self, candidate: &str) {
        (**self).probing(candidate)
    }
    fn version_found(&self, version: &str) {
        (**self).version_found(version)
    }
    fn platform_started(&self, platform: &str) {
        (**self).platform_started(platform)
    }
    fn manifest_loaded(&self, files: usize, bundles: usize) {
        (**self).manifest_loaded(files, bundles)
    }
    fn files_queued(&self, pending: usize, skipped: usize) {
        (**self).files_queued(pending, skipped)
    }
    fn file_done(&self, name: &str, bytes: u64) {
        (**self).file_done(name, bytes)
    }
    fn file_skipped(&self, name: &str) {
        (**self).file_skipped(name)
    }
    fn file_failed(&self, name: &str, reason: &str) {
        (**self).file_failed(name, reason)
    }
    fn platform_finished(&self, platform: &str, result: &RunResult) {
        (**self).platform_finished(platform, result)
    }
}

/// A no-op reporter for silent runs (e.g. tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn probing(&self, _: &str) {}
    fn version_found(&self, _: &str) {}
    fn platform_started(&self, _: &str) {}
    fn manifest_loaded(&self, _: usize, _: usize) {}
    fn files_queued(&self, _: usize, _: usize) {}
    fn file_done(&self, _: &str, _: u64) {}
    fn file_skipped(&self, _: &str) {}
    fn file_failed(&self, _: &str, _: &str) {}
    fn platform_finished(&self, _: &str, _: &RunResult) {}
}
