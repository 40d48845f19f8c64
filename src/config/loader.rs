// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** validate. Use
/// [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// A relative `[command].cwd` is resolved against the directory holding the
/// config file, so the config behaves the same from any working directory.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let mut raw_config = load_from_path(path)?;

    if let Some(cwd) = raw_config.command.cwd.take() {
        raw_config.command.cwd = Some(if cwd.is_relative() && !cwd.as_os_str().is_empty() {
            config_root_dir(path).join(cwd)
        } else {
            cwd
        });
    }

    ConfigFile::try_from(raw_config)
}

/// Parse and validate config text. Relative paths are kept as written.
pub fn parse_str(contents: &str) -> Result<ConfigFile> {
    let raw_config: RawConfigFile = toml::from_str(contents)?;
    ConfigFile::try_from(raw_config)
}

/// Conventional config location: `Lazysh.toml` in the current directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Lazysh.toml")
}

/// Directory containing the config file, or `.` for a bare file name.
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
