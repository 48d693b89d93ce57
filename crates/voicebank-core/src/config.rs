//! Configuration types for the voicebank downloader

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main downloader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoicebankConfig {
    /// Manifest listing the voices to fetch
    #[serde(default = "default_manifest_path")]
    pub manifest_path: PathBuf,

    /// Directory the samples are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Per-request timeout in seconds; unset means wait forever
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Draw a byte progress bar while a file downloads
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

impl Default for VoicebankConfig {
    fn default() -> Self {
        Self {
            manifest_path: default_manifest_path(),
            output_dir: default_output_dir(),
            timeout_secs: None,
            user_agent: default_user_agent(),
            show_progress: default_show_progress(),
        }
    }
}

impl VoicebankConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from("voice-index.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_user_agent() -> String {
    concat!("voicebank/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_show_progress() -> bool {
    true
}
