// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// File name looked for when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "Autorun.toml";

/// Read and deserialize the `[executor]` table at `path`, without validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let text = fs::read_to_string(path.as_ref())?;
    Ok(toml::from_str(&text)?)
}

/// Parse and validate configuration held in memory.
///
/// An empty document yields the defaults.
pub fn parse_config(text: &str) -> Result<ConfigFile> {
    let raw: RawConfigFile = toml::from_str(text)?;
    ConfigFile::try_from(raw)
}

/// Read, parse and validate the configuration file at `path`.
///
/// Validation runs once here; the resulting settings are trusted afterwards.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    ConfigFile::try_from(load_from_path(path)?)
}

/// `Autorun.toml`, relative to the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}
