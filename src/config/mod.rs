// src/config/mod.rs

//! Optional TOML configuration for command defaults and logging.
//!
//! ```toml
//! [command]
//! cwd = "build"
//!
//! [command.env]
//! LANG = "C"
//!
//! [logging]
//! level = "debug"
//! ```

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, parse_str};
pub use model::{ConfigFile, LoggingSection, RawConfigFile};
