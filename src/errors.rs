// src/errors.rs

//! Crate-wide error types.
//!
//! [`CommandError`] is what a single command execution can fail with. It is
//! `Clone` because one execution is observed through several views (stream,
//! text, exit status) and each of them reports the same failure.
//! [`LazyshError`] covers the surrounding library surface (config, logging).

use std::io;
use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CommandError {
    #[error("failed to tokenize command segment {segment:?}: {reason}")]
    Tokenize { segment: String, reason: String },

    #[error("cannot spawn an empty command")]
    EmptyCommand,

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: Arc<io::Error>,
    },

    /// Non-zero exit. The message is the trimmed stderr of the process.
    #[error("{message}")]
    Exit {
        program: String,
        code: Option<i32>,
        message: String,
    },

    #[error("the output of this command was already claimed")]
    OutputClaimed,

    #[error("the input of this command was already claimed")]
    InputClaimed,

    #[error("process monitor stopped before `{program}` finished")]
    MonitorLost { program: String },

    #[error("I/O error: {0}")]
    Io(#[source] Arc<io::Error>),
}

impl CommandError {
    /// Exit code of the process, if it ran and exited with one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CommandError::Exit { code, .. } => *code,
            _ => None,
        }
    }
}

impl From<io::Error> for CommandError {
    /// Stream views carry a `CommandError` inside an `io::Error`; unwrap it
    /// again when present so callers see the original failure.
    fn from(err: io::Error) -> Self {
        match err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<CommandError>())
        {
            Some(cmd_err) => cmd_err.clone(),
            None => CommandError::Io(Arc::new(err)),
        }
    }
}

impl From<CommandError> for io::Error {
    fn from(err: CommandError) -> Self {
        match &err {
            CommandError::OutputClaimed | CommandError::InputClaimed => {
                io::Error::new(io::ErrorKind::BrokenPipe, err)
            }
            _ => io::Error::other(err),
        }
    }
}

#[derive(Error, Debug)]
pub enum LazyshError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LazyshError>;
