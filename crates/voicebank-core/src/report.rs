//! Console progress reporting for batch runs

use std::fmt;
use std::io::Write;
use std::path::Path;

use crate::batch::{DownloadCounters, SkipReason};
use crate::error::{DownloadError, Error};
use crate::manifest::VoiceEntry;

/// 1-based position of an entry within the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub index: usize,
    pub total: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{}]", self.index, self.total)
    }
}

/// Observer for batch events.
///
/// Every method has an empty default so implementations only handle what
/// they care about.
pub trait Reporter {
    fn manifest_loading(&mut self, _path: &Path) {}

    fn manifest_loaded(&mut self, _count: usize) {}

    fn manifest_failed(&mut self, _error: &Error) {}

    fn entry_skipped(&mut self, _pos: Position, _entry: &VoiceEntry, _reason: &SkipReason) {}

    fn download_started(&mut self, _pos: Position, _file_name: &str) {}

    fn download_finished(
        &mut self,
        _pos: Position,
        _file_name: &str,
        _result: &std::result::Result<u64, DownloadError>,
    ) {
    }

    fn summary(&mut self, _counters: &DownloadCounters) {}
}

/// Reporter that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Human-readable progress lines written to a sink (stdout by default)
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.out.write_fmt(args);
        let _ = self.out.write_all(b"\n");
        let _ = self.out.flush();
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn manifest_loading(&mut self, path: &Path) {
        self.line(format_args!("Reading manifest: {}", path.display()));
    }

    fn manifest_loaded(&mut self, count: usize) {
        self.line(format_args!("Found {} voice files\n", count));
    }

    fn manifest_failed(&mut self, error: &Error) {
        self.line(format_args!("Error: {}", error));
    }

    fn entry_skipped(&mut self, pos: Position, entry: &VoiceEntry, reason: &SkipReason) {
        match reason {
            SkipReason::MissingUrl => {
                self.line(format_args!("{} Skipped: {} (no URL)", pos, entry.name))
            }
            SkipReason::AlreadyExists(path) => self.line(format_args!(
                "{} Skipped: {} (already exists)",
                pos,
                display_name(path)
            )),
            SkipReason::DuplicateName(path) => self.line(format_args!(
                "{} Skipped: {} (duplicate of an earlier entry)",
                pos,
                display_name(path)
            )),
        }
    }

    fn download_started(&mut self, pos: Position, file_name: &str) {
        self.line(format_args!("{} Downloading: {}", pos, file_name));
    }

    fn download_finished(
        &mut self,
        _pos: Position,
        file_name: &str,
        result: &std::result::Result<u64, DownloadError>,
    ) {
        match result {
            Ok(_) => self.line(format_args!("✓ Downloaded: {}", file_name)),
            Err(e) => self.line(format_args!("✗ Download failed: {} - {}", file_name, e)),
        }
    }

    fn summary(&mut self, counters: &DownloadCounters) {
        self.line(format_args!("\n{}", "=".repeat(50)));
        self.line(format_args!("Download finished!"));
        self.line(format_args!("Succeeded: {}", counters.success));
        self.line(format_args!("Failed: {}", counters.failure));
        self.line(format_args!("Skipped: {}", counters.skipped));
        self.line(format_args!("Total: {}", counters.total));
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
