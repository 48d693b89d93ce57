//! Error types for the voicebank downloader

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that stop a batch run before or outside the per-entry loop
#[derive(Error, Debug)]
pub enum Error {
    #[error("Manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("Failed to read manifest {}: {source}", .path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {}: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl Error {
    /// Manifest errors abort the run quietly; everything else is a real failure.
    pub fn is_manifest_error(&self) -> bool {
        matches!(
            self,
            Error::ManifestNotFound(_) | Error::ManifestRead { .. } | Error::ManifestParse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a single download did not produce a file
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
