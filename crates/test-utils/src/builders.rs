#![allow(dead_code)]

use std::path::PathBuf;

use lazysh::config::{ConfigFile, LoggingSection, RawConfigFile};
use lazysh::errors::Result;
use lazysh::{CommandOptions, LogLevel};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                command: CommandOptions::default(),
                logging: LoggingSection::default(),
            },
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.config.command.cwd = Some(cwd.into());
        self
    }

    /// Adds one variable (unlike `CommandOptions::with_env`, which replaces).
    pub fn with_env_var(mut self, name: &str, value: &str) -> Self {
        self.config
            .command
            .env
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = Some(level);
        self
    }

    /// Validate without panicking, for tests of the validation itself.
    pub fn try_build(self) -> Result<ConfigFile> {
        ConfigFile::try_from(self.config)
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
