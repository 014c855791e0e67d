//! Terminal implementation of the core `Reporter`.
//!
//! Per-file events update a single progress line on stderr, redrawn at most
//! every [`REDRAW_INTERVAL`]. Failures and summaries are printed in full.

use std::io::Write;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crossterm::{
    QueueableCommand,
    cursor::MoveToColumn,
    style::{Print, Stylize},
    terminal::{Clear, ClearType},
};
use cytrus_core::{Reporter, RunResult};

use super::format_size;

const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Default)]
struct Progress {
    pending: usize,
    done: usize,
    failed: usize,
    bytes: u64,
    last_draw: Option<Instant>,
}

#[derive(Debug)]
pub struct ConsoleReporter {
    quiet: bool,
    progress: Mutex<Progress>,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            progress: Mutex::new(Progress::default()),
        }
    }

    fn with_progress(&self, force: bool, update: impl FnOnce(&mut Progress)) {
        let Ok(mut p) = self.progress.lock() else {
            return;
        };
        update(&mut p);
        if self.quiet {
            return;
        }
        let now = Instant::now();
        let due = p
            .last_draw
            .is_none_or(|t| now.duration_since(t) >= REDRAW_INTERVAL);
        if force || due {
            p.last_draw = Some(now);
            let line = format!(
                "  {}/{} files, {} failed, {}",
                p.done + p.failed,
                p.pending,
                p.failed,
                format_size(p.bytes)
            );
            let _ = redraw(&mut std::io::stderr().lock(), Some(&line));
        }
    }

    fn clear_line(&self) {
        if !self.quiet {
            let _ = redraw(&mut std::io::stderr().lock(), None);
        }
    }
}

/// Replace the current terminal line with `line`, or just blank it.
fn redraw<W: Write>(out: &mut W, line: Option<&str>) -> std::io::Result<()> {
    out.queue(MoveToColumn(0))?;
    out.queue(Clear(ClearType::CurrentLine))?;
    if let Some(line) = line {
        out.queue(Print(line.dark_grey()))?;
    }
    out.flush()
}

impl Reporter for ConsoleReporter {
    fn probing(&self, candidate: &str) {
        tracing::debug!(candidate, "Probing");
    }

    fn version_found(&self, version: &str) {
        if !self.quiet {
            eprintln!("{} Release {}", "●".cyan(), version.bold());
        }
    }

    fn platform_started(&self, platform: &str) {
        if let Ok(mut p) = self.progress.lock() {
            *p = Progress::default();
        }
        if !self.quiet {
            eprintln!("{} {}", "●".cyan(), platform.bold());
        }
    }

    fn manifest_loaded(&self, files: usize, bundles: usize) {
        if !self.quiet {
            eprintln!("  {files} files in {bundles} bundles");
        }
    }

    fn files_queued(&self, pending: usize, skipped: usize) {
        // Rejected names are reported before queueing and stay counted.
        self.with_progress(true, |p| p.pending = pending + p.failed);
        if skipped > 0 && !self.quiet {
            self.clear_line();
            eprintln!("  {}", format!("{skipped} files already up to date").dark_grey());
        }
    }

    fn file_done(&self, _name: &str, bytes: u64) {
        self.with_progress(false, |p| {
            p.done += 1;
            p.bytes += bytes;
        });
    }

    fn file_skipped(&self, _name: &str) {
        self.with_progress(false, |p| p.done += 1);
    }

    fn file_failed(&self, name: &str, reason: &str) {
        self.with_progress(false, |p| p.failed += 1);
        self.clear_line();
        eprintln!("  {} {name}: {reason}", "✗".red());
    }

    fn platform_finished(&self, platform: &str, result: &RunResult) {
        self.clear_line();
        if self.quiet {
            return;
        }
        let mark = if result.is_success() {
            "✓".green()
        } else {
            "✗".red()
        };
        eprintln!(
            "{mark} {platform}: {} written ({}), {} skipped, {} failed",
            result.completed,
            format_size(result.bytes),
            result.skipped,
            result.failed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(reporter: &ConsoleReporter) -> (usize, usize, usize) {
        let p = reporter.progress.lock().unwrap();
        (p.pending, p.done, p.failed)
    }

    #[test]
    fn early_failures_survive_queueing() {
        let reporter = ConsoleReporter::new(true);
        reporter.platform_started("windows");
        reporter.file_failed("../escape", "unsafe name");
        reporter.files_queued(2, 1);
        reporter.file_done("a", 4);
        reporter.file_skipped("b");

        assert_eq!(counts(&reporter), (3, 2, 1));
    }

    #[test]
    fn new_platform_resets_progress() {
        let reporter = ConsoleReporter::new(true);
        reporter.platform_started("windows");
        reporter.files_queued(1, 0);
        reporter.file_failed("a", "boom");

        reporter.platform_started("darwin");
        assert_eq!(counts(&reporter), (0, 0, 0));
    }

    #[test]
    fn redraw_clears_with_terminal_commands() {
        let mut out = Vec::new();
        redraw(&mut out, None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\x1b[1G\x1b[2K");

        let mut out = Vec::new();
        redraw(&mut out, Some("1/2 files")).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1/2 files"));
    }
}
