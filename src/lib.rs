// src/lib.rs

//! Lazily executed shell-like commands.
//!
//! ```no_run
//! # async fn demo() -> Result<(), lazysh::CommandError> {
//! use lazysh::sh;
//!
//! let name = "Mr White";
//! let greeting = sh!("echo -n Hello {}", name)?.await?;
//! assert_eq!(greeting, "Hello Mr White");
//!
//! let listing = sh!("ls")?.in_dir("/").with_env([("LANG", "C")]).await?;
//! # let _ = listing;
//! # Ok(())
//! # }
//! ```
//!
//! Nothing runs until a command is observed (awaited, streamed or piped).
//! Commands start with an empty environment; see [`CommandOptions`].

pub mod command;
pub mod config;
pub mod deferred;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

pub use command::{Arg, Command, CommandOptions, CommandSpec, Template};
pub use errors::{CommandError, LazyshError};
pub use exec::{CommandReader, CommandStream, CommandWriter};
pub use types::LogLevel;

/// Build a [`Command`] from a `{}` template.
///
/// Literal text is split into words with shell quoting rules; each argument
/// is converted with [`Arg::from`] and inserted without re-splitting.
/// Evaluates to `Result<Command, CommandError>`.
///
/// ```
/// let cmd = lazysh::sh!("echo -n {} {}", "a b", vec!["c", "d"]).unwrap();
/// assert_eq!(cmd.args(), &["echo", "-n", "a b", "c", "d"]);
/// ```
#[macro_export]
macro_rules! sh {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::Command::parse($fmt, ::std::vec![$($crate::Arg::from($arg)),*])
    };
}
