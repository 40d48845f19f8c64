// src/command/mod.rs

//! The command value.
//!
//! A [`Command`] is built from a template and is inert until observed. The
//! first call that needs the process (`stream`, `reader`, `writer`, `text`,
//! `wait`, `pipe`, or awaiting the command) spawns it; every later call, and
//! every clone of the same value, reuses that one process.
//!
//! [`Command::in_dir`], [`Command::with_env`] and [`Command::with_options`]
//! never touch the current value: they return a new, unstarted command.

pub mod options;
pub mod template;

use std::fmt;
use std::future::{Future, IntoFuture};
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use tokio::io::AsyncWrite;
use tracing::debug;

use crate::deferred::Deferred;
use crate::errors::CommandError;
use crate::exec::{pipe, CommandReader, CommandStream, CommandWriter, ExecutionHandle};

pub use options::CommandOptions;
pub use template::{Arg, Template};

/// Resolved argument vector plus options; everything known before spawning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    argv: Vec<String>,
    options: CommandOptions,
}

impl CommandSpec {
    pub fn new(argv: Vec<String>, options: CommandOptions) -> Self {
        Self { argv, options }
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn options(&self) -> &CommandOptions {
        &self.options
    }
}

/// A lazily executed command, readable as text or as a byte stream.
///
/// Cloning shares the execution: clones are the same command, not a rerun.
#[derive(Clone)]
pub struct Command {
    inner: Arc<Deferred<CommandSpec, ExecutionHandle>>,
}

impl Command {
    /// Parse a `{}` template. See [`Template`] for the rules.
    pub fn parse(fmt: &str, args: Vec<Arg>) -> Result<Self, CommandError> {
        Self::from_template(&Template::new(fmt, args))
    }

    pub fn from_template(template: &Template) -> Result<Self, CommandError> {
        let argv = template.resolve()?;
        Ok(Self::from_spec(CommandSpec::new(argv, CommandOptions::default())))
    }

    /// Build directly from an argument vector, without any tokenizing.
    pub fn from_argv<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv = argv.into_iter().map(Into::into).collect();
        Self::from_spec(CommandSpec::new(argv, CommandOptions::default()))
    }

    fn from_spec(spec: CommandSpec) -> Self {
        Self {
            inner: Arc::new(Deferred::new(spec, ExecutionHandle::spawn)),
        }
    }

    fn spec(&self) -> &CommandSpec {
        self.inner.base()
    }

    /// The full argument vector; the first element is the program.
    pub fn args(&self) -> &[String] {
        self.spec().argv()
    }

    pub fn program(&self) -> Option<&str> {
        self.args().first().map(String::as_str)
    }

    pub fn options(&self) -> &CommandOptions {
        self.spec().options()
    }

    /// Same command, run in `cwd`.
    pub fn in_dir(&self, cwd: impl Into<PathBuf>) -> Self {
        self.with_options(self.options().clone().in_dir(cwd))
    }

    /// Same command with `env` as its complete environment.
    ///
    /// Replaces the previous environment; chained calls do not accumulate.
    pub fn with_env<I, K, V>(&self, env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.with_options(self.options().clone().with_env(env))
    }

    pub fn with_options(&self, options: CommandOptions) -> Self {
        Self::from_spec(CommandSpec::new(self.args().to_vec(), options))
    }

    /// Whether the process has been spawned.
    pub fn is_started(&self) -> bool {
        self.inner.is_initialized()
    }

    /// Process id, if the command was started and spawned successfully.
    /// Does not start the command.
    pub fn pid(&self) -> Option<u32> {
        self.inner.get_if_ready().and_then(|exec| exec.process().pid())
    }

    fn execution(&self) -> &ExecutionHandle {
        let first = !self.inner.is_initialized();
        let exec = self.inner.get();
        if first {
            debug!(command = %self, "command started");
        }
        exec
    }

    /// Duplex view: write to stdin, read stdout.
    ///
    /// Reading yields stdout and then, for a failed command, one error
    /// carrying the [`CommandError`]; afterwards reads return EOF.
    ///
    /// # Panics
    ///
    /// Starting the command requires a Tokio runtime.
    pub fn stream(&self) -> Result<CommandStream, CommandError> {
        self.execution().stream()
    }

    pub fn reader(&self) -> Result<CommandReader, CommandError> {
        self.execution().process().take_reader()
    }

    pub fn writer(&self) -> Result<CommandWriter, CommandError> {
        self.execution().process().take_writer()
    }

    /// Collected stdout, untrimmed. Fails with the command's stderr text
    /// when it exits unsuccessfully.
    pub async fn text(&self) -> Result<String, CommandError> {
        self.execution().text().await
    }

    /// Wait for exit without consuming stdout.
    ///
    /// A command that writes more than the pipe can hold blocks until its
    /// output is read elsewhere.
    pub async fn wait(&self) -> Result<(), CommandError> {
        self.execution().wait().await
    }

    /// Feed this command's output into `downstream` and return `downstream`,
    /// so pipelines chain left to right:
    ///
    /// ```no_run
    /// # async fn demo() -> Result<(), lazysh::CommandError> {
    /// let count = lazysh::sh!("echo -n hello")?
    ///     .pipe(lazysh::sh!("wc -c")?)?
    ///     .pipe(lazysh::sh!("cat")?)?
    ///     .await?;
    /// assert_eq!(count, "5\n");
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// Fails without starting `downstream` when this command's output is
    /// already claimed. If `downstream`'s input is already claimed, the
    /// output claimed here is handed back.
    pub fn pipe(&self, downstream: Command) -> Result<Command, CommandError> {
        let reader = self.reader()?;
        let writer = match downstream.writer() {
            Ok(writer) => writer,
            Err(err) => {
                self.execution().process().restore_reader(reader);
                return Err(err);
            }
        };
        pipe::forward(reader, writer, self.to_string(), downstream.to_string());
        Ok(downstream)
    }

    /// Write all output into `sink`, shut it down and hand it back.
    pub async fn pipe_into<W>(&self, sink: W) -> Result<W, CommandError>
    where
        W: AsyncWrite + Unpin,
    {
        let reader = self.reader()?;
        pipe::drain_into(reader, sink).await
    }
}

impl fmt::Display for Command {
    /// Program unquoted, every argument double-quoted with `"` escaped.
    /// For display only; nested commands interpolate their raw arguments.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut argv = self.args().iter();
        if let Some(program) = argv.next() {
            f.write_str(program)?;
        }
        for arg in argv {
            write!(f, " \"{}\"", arg.replace('"', "\\\""))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("argv", &self.args())
            .field("options", self.options())
            .field("started", &self.is_started())
            .finish()
    }
}

type TextFuture<'a> = Pin<Box<dyn Future<Output = Result<String, CommandError>> + Send + 'a>>;

impl IntoFuture for Command {
    type Output = Result<String, CommandError>;
    type IntoFuture = TextFuture<'static>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.text().await })
    }
}

impl<'a> IntoFuture for &'a Command {
    type Output = Result<String, CommandError>;
    type IntoFuture = TextFuture<'a>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_arguments_but_not_program() {
        let cmd = Command::from_argv(["echo", "-n", r#"say "hi""#]);
        assert_eq!(cmd.to_string(), r#"echo "-n" "say \"hi\"""#);
    }

    #[test]
    fn construction_does_not_start() {
        let cmd = Command::parse("touch {}", vec![Arg::from("/nonexistent/never")]).unwrap();
        assert!(!cmd.is_started());
        assert_eq!(cmd.pid(), None);
        assert_eq!(cmd.program(), Some("touch"));
    }

    #[test]
    fn variants_are_new_unstarted_commands() {
        let base = Command::from_argv(["printenv"]);
        let moved = base.in_dir("/tmp");
        let env = moved.with_env([("a", "1")]).with_env([("b", "2")]);

        assert!(base.options().cwd().is_none());
        assert_eq!(moved.options().cwd(), Some(std::path::Path::new("/tmp")));
        assert_eq!(env.options().cwd(), Some(std::path::Path::new("/tmp")));
        assert_eq!(env.options().env.keys().collect::<Vec<_>>(), vec!["b"]);
        assert!(moved.options().env.is_empty());
        assert_eq!(env.args(), base.args());
    }

    #[test]
    fn nested_command_interpolates_raw_arguments() {
        let inner = Command::parse("Hello {}", vec![Arg::from(r#"world of "sh""#)]).unwrap();
        let outer = Command::parse("echo -n {}", vec![Arg::from(&inner)]).unwrap();
        assert_eq!(outer.args(), &["echo", "-n", "Hello", r#"world of "sh""#]);
    }

    #[test]
    fn empty_template_is_accepted_until_spawn() {
        let cmd = Command::parse("", vec![]).unwrap();
        assert!(cmd.args().is_empty());
        assert_eq!(cmd.program(), None);
        assert_eq!(cmd.to_string(), "");
    }
}
