// src/config/model.rs

use serde::Deserialize;

use crate::command::CommandOptions;
use crate::types::LogLevel;

/// Configuration exactly as read from TOML, before validation.
///
/// All sections are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// `[command]`: default options for commands built from this config.
    #[serde(default)]
    pub command: CommandOptions,

    /// `[logging]`.
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSection {
    /// If `None`, `LAZYSH_LOG` or the default level applies.
    #[serde(default)]
    pub level: Option<LogLevel>,
}

/// Validated configuration. Obtain one through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    command: CommandOptions,
    logging: LoggingSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(command: CommandOptions, logging: LoggingSection) -> Self {
        Self { command, logging }
    }

    /// Options to hand to [`Command::with_options`](crate::Command::with_options).
    pub fn options(&self) -> &CommandOptions {
        &self.command
    }

    pub fn log_level(&self) -> Option<LogLevel> {
        self.logging.level
    }
}
