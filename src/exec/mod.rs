// src/exec/mod.rs

//! Process execution layer.
//!
//! Everything here runs on Tokio and is created lazily by
//! [`Command`](crate::Command):
//!
//! - [`process`] spawns the child with piped stdio and an explicit
//!   environment, and publishes its exit outcome once.
//! - [`stream`] exposes stdout/stdin as `AsyncRead`/`AsyncWrite` halves.
//! - [`duplex`] pairs a writer and a reader into one stream.
//! - [`output`] collects stdout into a string.
//! - [`pipe`] forwards one command's output into another stream.

pub mod duplex;
pub mod output;
pub mod pipe;
pub mod process;
pub mod stream;

pub use duplex::Duplex;
pub use output::{ResolvedOutput, TextOutcome};
pub use process::{ExitOutcome, ProcessHandle};
pub use stream::{CommandReader, CommandStream, CommandWriter};

use crate::command::CommandSpec;
use crate::deferred::Deferred;
use crate::errors::CommandError;

/// The single execution behind a command: a spawned process, plus its text
/// output which is only collected when somebody asks for it.
#[derive(Debug)]
pub struct ExecutionHandle {
    inner: Deferred<ProcessHandle, ResolvedOutput>,
}

impl ExecutionHandle {
    /// Spawn the process for `spec`. Must run inside a Tokio runtime.
    pub fn spawn(spec: &CommandSpec) -> Self {
        Self {
            inner: Deferred::new(ProcessHandle::spawn(spec), ResolvedOutput::collect),
        }
    }

    pub fn process(&self) -> &ProcessHandle {
        self.inner.base()
    }

    /// The collected output, starting collection on first use.
    pub fn output(&self) -> &ResolvedOutput {
        self.inner.get()
    }

    pub fn stream(&self) -> Result<CommandStream, CommandError> {
        let writer = self.process().take_writer()?;
        let reader = self.process().take_reader()?;
        Ok(Duplex::new(writer, reader))
    }

    pub async fn text(&self) -> TextOutcome {
        self.output().text().await
    }

    pub async fn wait(&self) -> ExitOutcome {
        self.process().wait().await
    }
}
