//! Voicebank Core - Manifest-driven voice sample downloader
//!
//! Reads a `voice-index.json` manifest and fetches every listed sample into
//! a local directory, one file at a time.
//!
//! # Architecture
//!
//! - [`manifest`] parses the voice index
//! - [`sanitize`] turns display names into safe file names
//! - [`download`] fetches a single URL to a single file
//! - [`batch`] walks the manifest, applies skip rules and counts outcomes
//! - [`report`] renders batch events for the console
//!
//! # Example
//!
//! ```ignore
//! use voicebank_core::{run_from_config, ConsoleReporter, HttpDownloader, VoicebankConfig};
//!
//! let config = VoicebankConfig::default();
//! let downloader = HttpDownloader::new(&config)?;
//! let counters = run_from_config(&config, &downloader, &mut ConsoleReporter::stdout())?;
//! ```

pub mod batch;
pub mod config;
pub mod download;
pub mod error;
pub mod manifest;
pub mod report;
pub mod sanitize;

pub use batch::{run_from_config, BatchDriver, DownloadCounters, EntryOutcome, SkipReason};
pub use config::VoicebankConfig;
pub use download::{Fetch, HttpDownloader};
pub use error::{DownloadError, Error, Result};
pub use manifest::{Manifest, VoiceEntry};
pub use report::{ConsoleReporter, NullReporter, Position, Reporter};
pub use sanitize::{sanitize_filename, voice_filename};
