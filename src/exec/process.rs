// src/exec/process.rs

//! Spawning one command process and tracking its exit.

use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::io::AsyncReadExt;
use tokio::process::{Child, ChildStderr};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::command::CommandSpec;
use crate::errors::CommandError;

use super::stream::{CommandReader, CommandWriter};

/// How a process ended: `Ok` for exit code zero.
pub type ExitOutcome = Result<(), CommandError>;

/// A spawned process (or a failed attempt to spawn one).
///
/// Holds the two unclaimed stream halves and a receiver for the exit
/// outcome. A background task owns the child itself: it collects stderr,
/// waits for exit and publishes the outcome exactly once.
pub struct ProcessHandle {
    program: String,
    pid: Option<u32>,
    reader: Mutex<Option<CommandReader>>,
    writer: Mutex<Option<CommandWriter>>,
    exit: watch::Receiver<Option<ExitOutcome>>,
}

impl ProcessHandle {
    /// Start the process described by `spec`.
    ///
    /// Never panics on spawn errors: an empty argument vector or a program
    /// that cannot be started yields a handle whose outcome is already the
    /// failure, so every view reports it the same way.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(spec: &CommandSpec) -> Self {
        let (exit_tx, exit_rx) = watch::channel(None);

        let Some((program, args)) = spec.argv().split_first() else {
            warn!("refusing to spawn an empty command");
            exit_tx.send_replace(Some(Err(CommandError::EmptyCommand)));
            return Self::settled(String::new(), exit_rx);
        };

        let options = spec.options();
        info!(
            program = %program,
            args = ?args,
            cwd = ?options.cwd(),
            env_vars = options.env.len(),
            "spawning command process"
        );

        let mut cmd = tokio::process::Command::new(program);
        cmd.args(args)
            .env_clear()
            .envs(&options.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(cwd) = options.cwd() {
            cmd.current_dir(cwd);
        }

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => {
                warn!(program = %program, error = %err, "failed to spawn command");
                exit_tx.send_replace(Some(Err(CommandError::Spawn {
                    program: program.clone(),
                    source: Arc::new(err),
                })));
                return Self::settled(program.clone(), exit_rx);
            }
        };

        let pid = child.id();
        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        monitor_exit(child, stderr, program.clone(), exit_tx);

        Self {
            program: program.clone(),
            pid,
            reader: Mutex::new(Some(CommandReader::new(
                stdout,
                program.clone(),
                exit_rx.clone(),
            ))),
            writer: Mutex::new(Some(CommandWriter::new(stdin, exit_rx.clone()))),
            exit: exit_rx,
        }
    }

    fn settled(program: String, exit: watch::Receiver<Option<ExitOutcome>>) -> Self {
        Self {
            reader: Mutex::new(Some(CommandReader::new(None, program.clone(), exit.clone()))),
            writer: Mutex::new(Some(CommandWriter::new(None, exit.clone()))),
            program,
            pid: None,
            exit,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// True once the exit outcome is known.
    pub fn has_exited(&self) -> bool {
        self.exit.borrow().is_some()
    }

    /// Claim the stdout side. Only the first caller gets it.
    pub fn take_reader(&self) -> Result<CommandReader, CommandError> {
        self.reader
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(CommandError::OutputClaimed)
    }

    /// Hand a claimed stdout side back, e.g. when the consumer it was taken
    /// for could not be set up.
    pub fn restore_reader(&self, reader: CommandReader) {
        let mut slot = self.reader.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(reader);
        }
    }

    /// Claim the stdin side. Only the first caller gets it.
    pub fn take_writer(&self) -> Result<CommandWriter, CommandError> {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(CommandError::InputClaimed)
    }

    /// Close stdin if nobody claimed it. Returns whether it was closed here.
    pub fn close_unclaimed_input(&self) -> bool {
        let writer = self
            .writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if writer.is_some() {
            debug!(program = %self.program, "closing unclaimed command input");
        }
        writer.is_some()
    }

    pub async fn wait(&self) -> ExitOutcome {
        wait_exit(self.exit.clone(), self.program.clone()).await
    }
}

impl std::fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("program", &self.program)
            .field("pid", &self.pid)
            .field("exited", &self.has_exited())
            .finish()
    }
}

/// Wait for the published exit outcome.
pub(crate) async fn wait_exit(
    mut exit: watch::Receiver<Option<ExitOutcome>>,
    program: String,
) -> ExitOutcome {
    let seen = exit
        .wait_for(Option::is_some)
        .await
        .map(|outcome| (*outcome).clone());

    match seen {
        Ok(Some(outcome)) => outcome,
        Ok(None) | Err(_) => Err(CommandError::MonitorLost { program }),
    }
}

/// Collect stderr and wait for the child, then publish the outcome.
///
/// The outcome is only published once stderr is drained *and* the process
/// has exited, so the error message always contains the complete stderr.
fn monitor_exit(
    mut child: Child,
    stderr: Option<ChildStderr>,
    program: String,
    exit_tx: watch::Sender<Option<ExitOutcome>>,
) {
    tokio::spawn(async move {
        let collect_stderr = async {
            let mut buf = Vec::new();
            if let Some(mut stderr) = stderr {
                if let Err(err) = stderr.read_to_end(&mut buf).await {
                    warn!(program = %program, error = %err, "failed reading command stderr");
                }
            }
            buf
        };

        let (stderr_buf, status) = tokio::join!(collect_stderr, child.wait());

        let outcome = match status {
            Ok(status) if status.success() => {
                info!(program = %program, exit_code = 0, "command process exited");
                Ok(())
            }
            Ok(status) => {
                let message = String::from_utf8_lossy(&stderr_buf).trim().to_string();
                info!(
                    program = %program,
                    exit_code = ?status.code(),
                    stderr = %message,
                    "command process failed"
                );
                Err(CommandError::Exit {
                    program: program.clone(),
                    code: status.code(),
                    message,
                })
            }
            Err(err) => {
                warn!(program = %program, error = %err, "waiting for command process failed");
                Err(CommandError::Io(Arc::new(err)))
            }
        };

        exit_tx.send_replace(Some(outcome));
        debug!(program = %program, "command monitor finished");
    });
}
