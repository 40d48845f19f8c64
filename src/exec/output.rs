// src/exec/output.rs

//! Collected text output of a command.

use tokio::io::AsyncReadExt;
use tokio::sync::watch;
use tracing::debug;

use crate::errors::CommandError;

use super::process::ProcessHandle;

pub type TextOutcome = Result<String, CommandError>;

/// Stdout of a process gathered into one string.
///
/// Collection starts as soon as this value is created and runs in the
/// background, so the result settles even if nobody is awaiting it yet.
/// Output is decoded as UTF-8 (lossily) and never trimmed.
///
/// Everything is buffered in memory; this is meant for short-lived command
/// output, not for unbounded streams.
#[derive(Debug)]
pub struct ResolvedOutput {
    program: String,
    result: watch::Receiver<Option<TextOutcome>>,
}

impl ResolvedOutput {
    /// Claim the process' stdout and start collecting it.
    ///
    /// If stdin was never claimed it is closed, so commands that read their
    /// input see EOF instead of waiting forever.
    pub fn collect(process: &ProcessHandle) -> Self {
        let (tx, rx) = watch::channel(None);
        let program = process.program().to_string();

        match process.take_reader() {
            Ok(mut reader) => {
                process.close_unclaimed_input();
                let program = program.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let outcome = match reader.read_to_end(&mut buf).await {
                        Ok(n) => {
                            debug!(program = %program, bytes = n, "collected command output");
                            Ok(String::from_utf8_lossy(&buf).into_owned())
                        }
                        Err(err) => Err(CommandError::from(err)),
                    };
                    tx.send_replace(Some(outcome));
                });
            }
            Err(err) => {
                tx.send_replace(Some(Err(err)));
            }
        }

        Self {
            program,
            result: rx,
        }
    }

    pub async fn text(&self) -> TextOutcome {
        let mut rx = self.result.clone();
        let seen = rx
            .wait_for(Option::is_some)
            .await
            .map(|outcome| (*outcome).clone());

        match seen {
            Ok(Some(outcome)) => outcome,
            Ok(None) | Err(_) => Err(CommandError::MonitorLost {
                program: self.program.clone(),
            }),
        }
    }
}
