// src/exec/stream.rs

//! Byte-stream views over a running process.
//!
//! - [`CommandReader`] yields stdout, then the exit outcome: a failed exit is
//!   reported as exactly one read error, after which every read is EOF.
//! - [`CommandWriter`] feeds stdin. Once the process has exited the writable
//!   side is ended and writes fail with `BrokenPipe`.
//! - [`CommandStream`] pairs both into one duplex stream.

use std::fmt;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::process::{ChildStdin, ChildStdout};
use tokio::sync::watch;

use super::duplex::Duplex;
use super::process::{wait_exit, ExitOutcome};

/// Duplex view of a command: write to its stdin, read from its stdout.
pub type CommandStream = Duplex<CommandWriter, CommandReader>;

type ExitFuture = Pin<Box<dyn Future<Output = ExitOutcome> + Send>>;

/// Readable side of a command.
pub struct CommandReader {
    stdout: Option<ChildStdout>,
    exit: Option<ExitFuture>,
}

impl CommandReader {
    pub(crate) fn new(
        stdout: Option<ChildStdout>,
        program: String,
        exit: watch::Receiver<Option<ExitOutcome>>,
    ) -> Self {
        Self {
            stdout,
            exit: Some(Box::pin(wait_exit(exit, program))),
        }
    }
}

impl AsyncRead for CommandReader {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();

        if buf.remaining() == 0 {
            return Poll::Ready(Ok(()));
        }

        if let Some(stdout) = this.stdout.as_mut() {
            let before = buf.filled().len();
            ready!(Pin::new(stdout).poll_read(cx, buf))?;
            if buf.filled().len() > before {
                return Poll::Ready(Ok(()));
            }
            // stdout reached EOF; the exit outcome decides how the stream ends.
            this.stdout = None;
        }

        if let Some(exit) = this.exit.as_mut() {
            let outcome = ready!(exit.as_mut().poll(cx));
            this.exit = None;
            if let Err(err) = outcome {
                return Poll::Ready(Err(err.into()));
            }
        }

        Poll::Ready(Ok(()))
    }
}

impl fmt::Debug for CommandReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandReader")
            .field("stdout_open", &self.stdout.is_some())
            .field("finished", &self.exit.is_none())
            .finish()
    }
}

/// Writable side of a command.
pub struct CommandWriter {
    stdin: Option<ChildStdin>,
    exit: watch::Receiver<Option<ExitOutcome>>,
}

impl CommandWriter {
    pub(crate) fn new(stdin: Option<ChildStdin>, exit: watch::Receiver<Option<ExitOutcome>>) -> Self {
        Self { stdin, exit }
    }

    /// Drop stdin once the process is gone; true when nothing can be written.
    fn ended(&mut self) -> bool {
        if self.stdin.is_some() && self.exit.borrow().is_some() {
            self.stdin = None;
        }
        self.stdin.is_none()
    }
}

fn input_closed() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "command input is closed")
}

impl AsyncWrite for CommandWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        if this.ended() {
            return Poll::Ready(Err(input_closed()));
        }
        match this.stdin.as_mut() {
            Some(stdin) => Pin::new(stdin).poll_write(cx, buf),
            None => Poll::Ready(Err(input_closed())),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut().stdin.as_mut() {
            Some(stdin) => Pin::new(stdin).poll_flush(cx),
            None => Poll::Ready(Ok(())),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if let Some(stdin) = this.stdin.as_mut() {
            // A child that already exited may report EPIPE here; the input is
            // closed either way.
            if let Err(err) = ready!(Pin::new(stdin).poll_shutdown(cx)) {
                if err.kind() != io::ErrorKind::BrokenPipe {
                    this.stdin = None;
                    return Poll::Ready(Err(err));
                }
            }
        }
        this.stdin = None;
        Poll::Ready(Ok(()))
    }
}

impl fmt::Debug for CommandWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandWriter")
            .field("stdin_open", &self.stdin.is_some())
            .finish()
    }
}
