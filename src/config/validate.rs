// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{LazyshError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = LazyshError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.command, raw.logging))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_cwd(cfg)?;
    validate_env(cfg)?;
    Ok(())
}

fn validate_cwd(cfg: &RawConfigFile) -> Result<()> {
    if let Some(cwd) = cfg.command.cwd() {
        if cwd.as_os_str().is_empty() {
            return Err(LazyshError::ConfigError(
                "[command].cwd must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_env(cfg: &RawConfigFile) -> Result<()> {
    for (name, value) in cfg.command.env.iter() {
        if name.is_empty() {
            return Err(LazyshError::ConfigError(
                "[command.env] contains an empty variable name".to_string(),
            ));
        }
        if name.contains('=') || name.contains('\0') {
            return Err(LazyshError::ConfigError(format!(
                "[command.env] variable name '{}' must not contain '=' or NUL",
                name.escape_debug()
            )));
        }
        if value.contains('\0') {
            return Err(LazyshError::ConfigError(format!(
                "[command.env] value of '{}' must not contain NUL",
                name
            )));
        }
    }
    Ok(())
}
