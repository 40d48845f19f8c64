// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! up to the application. [`init_logging`] is a ready-made one.
//!
//! Priority for determining the log level:
//! 1. the `level` argument (e.g. from a config file)
//! 2. `LAZYSH_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs go to STDERR so stdout stays free for command output.

use tracing_subscriber::fmt;

use crate::errors::{LazyshError, Result};
use crate::types::LogLevel;

pub const LOG_ENV_VAR: &str = "LAZYSH_LOG";

/// Install the global logging subscriber.
///
/// Returns an error instead of panicking when a subscriber is already set.
pub fn init_logging(level: Option<LogLevel>) -> Result<()> {
    let level = resolve_level(level, std::env::var(LOG_ENV_VAR).ok().as_deref());

    fmt()
        .with_max_level(level.as_tracing_level())
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LazyshError::Other(anyhow::anyhow!("installing log subscriber: {e}")))
}

fn resolve_level(explicit: Option<LogLevel>, from_env: Option<&str>) -> LogLevel {
    explicit
        .or_else(|| from_env.and_then(|s| s.parse().ok()))
        .unwrap_or_default()
}
