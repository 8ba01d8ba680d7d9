// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::ConfigFile;
use crate::config::validate::validate_config;
use crate::errors::Result;

/// Load a configuration file and return the raw `ConfigFile`.
///
/// This only performs TOML deserialization; it does **not** run semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: ConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a configuration file from path and run validation.
///
/// This is the recommended entry point for the rest of the application:
/// reads TOML, applies serde defaults, then checks job/task sanity, unknown
/// `after` references and DAG cycles.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let config = load_from_path(&path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Default config path: `Crondag.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Crondag.toml")
}
