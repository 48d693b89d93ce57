//! Layered configuration loading

use config::{Config, Environment, File};
use std::path::{Path, PathBuf};
use thiserror::Error;

use voicebank_core::VoicebankConfig;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "voicebank.toml";

/// Environment variable prefix, e.g. `VOICEBANK_OUTPUT_DIR`
pub const ENV_PREFIX: &str = "VOICEBANK";

#[derive(Error, Debug)]
#[error("Invalid configuration: {0}")]
pub struct SettingsError(#[from] config::ConfigError);

/// Per-user config file, `<config dir>/voicebank/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("voicebank").join("config.toml"))
}

/// Load settings from defaults, the user config, `./voicebank.toml` and the
/// environment, in increasing order of precedence.
pub fn load() -> Result<VoicebankConfig, SettingsError> {
    load_from(user_config_path().as_deref(), Path::new(LOCAL_CONFIG_FILE))
}

pub fn load_from(
    user_config: Option<&Path>,
    local_config: &Path,
) -> Result<VoicebankConfig, SettingsError> {
    build(user_config, local_config, Environment::with_prefix(ENV_PREFIX))
}

fn build(
    user_config: Option<&Path>,
    local_config: &Path,
    environment: Environment,
) -> Result<VoicebankConfig, SettingsError> {
    let mut builder = Config::builder();

    if let Some(path) = user_config {
        builder = builder.add_source(File::from(path).required(false));
    }

    let settings = builder
        .add_source(File::from(local_config).required(false))
        .add_source(environment.try_parsing(true))
        .build()?;

    Ok(settings.try_deserialize()?)
}
