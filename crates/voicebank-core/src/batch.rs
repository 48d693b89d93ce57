//! Sequential batch driver
//!
//! Walks the manifest in order, decides for every entry whether to skip or
//! download it, and folds the per-entry outcomes into [`DownloadCounters`].
//! Nothing a single entry does can abort the batch; only manifest and
//! output-directory errors are fatal.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::VoicebankConfig;
use crate::download::Fetch;
use crate::error::{DownloadError, Error, Result};
use crate::manifest::{Manifest, VoiceEntry};
use crate::report::{Position, Reporter};

/// Totals for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadCounters {
    pub success: usize,
    pub failure: usize,
    pub skipped: usize,
    /// Number of entries in the manifest
    pub total: usize,
}

impl DownloadCounters {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn record(mut self, outcome: &EntryOutcome) -> Self {
        match outcome {
            EntryOutcome::Downloaded { .. } => self.success += 1,
            EntryOutcome::Failed { .. } => self.failure += 1,
            EntryOutcome::Skipped(_) => self.skipped += 1,
        }
        self
    }

    pub fn processed(&self) -> usize {
        self.success + self.failure + self.skipped
    }
}

/// Why an entry was not downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingUrl,
    AlreadyExists(PathBuf),
    /// An earlier entry in the same run already claimed this file name
    DuplicateName(PathBuf),
}

/// Result of processing a single manifest entry
#[derive(Debug)]
pub enum EntryOutcome {
    Downloaded { path: PathBuf, bytes: u64 },
    Failed { path: PathBuf, error: DownloadError },
    Skipped(SkipReason),
}

/// Drives one pass over a manifest
pub struct BatchDriver<'a, F: Fetch + ?Sized, R: Reporter + ?Sized> {
    output_dir: PathBuf,
    fetcher: &'a F,
    reporter: &'a mut R,
}

impl<'a, F: Fetch + ?Sized, R: Reporter + ?Sized> BatchDriver<'a, F, R> {
    pub fn new(output_dir: impl Into<PathBuf>, fetcher: &'a F, reporter: &'a mut R) -> Self {
        Self {
            output_dir: output_dir.into(),
            fetcher,
            reporter,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Process every entry and report the totals
    pub fn run(&mut self, manifest: &Manifest) -> Result<DownloadCounters> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| Error::OutputDir {
            path: self.output_dir.clone(),
            source: e,
        })?;

        let total = manifest.len();
        let mut claimed = HashSet::new();
        let mut counters = DownloadCounters::new(total);

        for (i, entry) in manifest.voices.iter().enumerate() {
            let pos = Position {
                index: i + 1,
                total,
            };
            let outcome = self.process(pos, entry, &mut claimed);
            counters = counters.record(&outcome);
        }

        info!(
            "Batch finished: {} succeeded, {} failed, {} skipped of {}",
            counters.success, counters.failure, counters.skipped, counters.total
        );
        self.reporter.summary(&counters);
        Ok(counters)
    }

    fn process(
        &mut self,
        pos: Position,
        entry: &VoiceEntry,
        claimed: &mut HashSet<PathBuf>,
    ) -> EntryOutcome {
        let Some(url) = entry.url.as_deref() else {
            return self.skip(pos, entry, SkipReason::MissingUrl);
        };

        let file_name = entry.file_name();
        let path = self.output_dir.join(&file_name);

        if !claimed.insert(path.clone()) {
            warn!("{} maps to {:?}, already used earlier in this run", entry.name, path);
            return self.skip(pos, entry, SkipReason::DuplicateName(path));
        }

        if path.exists() {
            return self.skip(pos, entry, SkipReason::AlreadyExists(path));
        }

        self.reporter.download_started(pos, &file_name);
        let result = self.fetcher.fetch(url, &path);
        self.reporter.download_finished(pos, &file_name, &result);

        match result {
            Ok(bytes) => EntryOutcome::Downloaded { path, bytes },
            Err(error) => {
                warn!("Download of {} from {} failed: {}", file_name, url, error);
                EntryOutcome::Failed { path, error }
            }
        }
    }

    fn skip(&mut self, pos: Position, entry: &VoiceEntry, reason: SkipReason) -> EntryOutcome {
        debug!("{} skipping {:?}: {:?}", pos, entry.name, reason);
        self.reporter.entry_skipped(pos, entry, &reason);
        EntryOutcome::Skipped(reason)
    }
}

/// Load the configured manifest and download everything in it.
///
/// Manifest errors are passed to the reporter and returned before the
/// output directory is touched.
pub fn run_from_config<F, R>(
    config: &VoicebankConfig,
    fetcher: &F,
    reporter: &mut R,
) -> Result<DownloadCounters>
where
    F: Fetch + ?Sized,
    R: Reporter + ?Sized,
{
    reporter.manifest_loading(&config.manifest_path);
    let manifest = match Manifest::load(&config.manifest_path) {
        Ok(manifest) => manifest,
        Err(e) => {
            reporter.manifest_failed(&e);
            return Err(e);
        }
    };
    reporter.manifest_loaded(manifest.len());

    BatchDriver::new(&config.output_dir, fetcher, reporter).run(&manifest)
}
