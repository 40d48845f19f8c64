// src/command/options.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Per-command execution options.
///
/// The default environment is **empty**: a spawned command never inherits
/// the parent's environment unless the variables are passed explicitly.
/// That keeps command behaviour reproducible across machines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommandOptions {
    /// Working directory; `None` means the caller's current directory.
    #[serde(default)]
    pub cwd: Option<PathBuf>,

    /// Complete environment of the child process.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl CommandOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Replace the whole environment.
    pub fn with_env<I, K, V>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = env
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }
}
