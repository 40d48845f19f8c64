use std::io::Write;
use std::path::Path;

use lazysh::config::{load_and_validate, parse_str};
use lazysh::errors::LazyshError;
use lazysh::LogLevel;
use lazysh_test_utils::builders::ConfigFileBuilder;
use tempfile::NamedTempFile;

#[test]
fn empty_config_uses_defaults() {
    let cfg = parse_str("").unwrap();
    assert!(cfg.options().env.is_empty());
    assert!(cfg.options().cwd().is_none());
    assert_eq!(cfg.log_level(), None);
}

#[test]
fn reads_command_and_logging_sections() {
    let cfg = parse_str(
        r#"
[command]
cwd = "/srv/app"

[command.env]
LANG = "C"
HOME = "/nonexistent"

[logging]
level = "debug"
"#,
    )
    .unwrap();

    assert_eq!(cfg.options().cwd(), Some(Path::new("/srv/app")));
    assert_eq!(cfg.options().env.len(), 2);
    assert_eq!(cfg.options().env["LANG"], "C");
    assert_eq!(cfg.log_level(), Some(LogLevel::Debug));
}

#[test]
fn relative_cwd_is_resolved_against_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Lazysh.toml");
    std::fs::write(&path, "[command]\ncwd = \"build\"\n").unwrap();

    let cfg = load_and_validate(&path).unwrap();
    assert_eq!(cfg.options().cwd(), Some(dir.path().join("build").as_path()));
}

#[test]
fn invalid_env_name_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[command.env]
"BAD=NAME" = "x"
"#
    )
    .unwrap();

    match load_and_validate(file.path()) {
        Err(LazyshError::ConfigError(msg)) => {
            assert!(msg.contains("BAD=NAME"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn empty_cwd_returns_config_error() {
    let result = ConfigFileBuilder::new().with_cwd("").try_build();
    assert!(matches!(result, Err(LazyshError::ConfigError(_))));
}

#[test]
fn unknown_log_level_is_a_toml_error() {
    let result = parse_str("[logging]\nlevel = \"loud\"\n");
    assert!(matches!(result, Err(LazyshError::TomlError(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = load_and_validate("/definitely/not/Lazysh.toml");
    assert!(matches!(result, Err(LazyshError::IoError(_))));
}

#[test]
fn builder_produces_valid_config() {
    let cfg = ConfigFileBuilder::new()
        .with_env_var("A", "1")
        .with_env_var("B", "2")
        .with_log_level(LogLevel::Warn)
        .build();

    assert_eq!(cfg.options().env.len(), 2);
    assert_eq!(cfg.log_level(), Some(LogLevel::Warn));
}

#[cfg(unix)]
#[tokio::test]
async fn config_options_drive_commands() {
    lazysh_test_utils::init_tracing();
    let cfg = ConfigFileBuilder::new().with_env_var("LANG", "C").build();

    let cmd = lazysh::sh!("printenv").unwrap().with_options(cfg.options().clone());
    let out = lazysh_test_utils::with_timeout(cmd).await.unwrap();
    assert_eq!(out, "LANG=C\n");
}
