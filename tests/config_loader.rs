use navstack::config::{Config, ConfigError};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::{NamedTempFile, TempDir};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

/// Test that missing config file returns default config.
#[test]
fn test_missing_config_returns_default() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("nonexistent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

/// Test defaults of every section.
#[test]
fn test_default_values() {
    let config = Config::default();
    assert_eq!(config.ui.tick_rate(), Duration::from_millis(250));
    assert_eq!(config.ui.frame_rate(), Duration::from_millis(16));
    assert_eq!(config.ui.transition_frames, 12);
    assert!(config.state.restore);
    assert!(config.state.path.is_none());
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.file.is_none());
}

/// Test that an empty file is a valid config.
#[test]
fn test_empty_config_uses_defaults() {
    let file = write_config("");
    let config = Config::load_from(file.path()).unwrap();
    assert_eq!(config, Config::default());
}

/// Test that a full config file is parsed.
#[test]
fn test_full_config_is_parsed() {
    let file = write_config(
        r#"
[ui]
tick_rate_ms = 100
frame_rate_ms = 20
transition_frames = 0

[state]
restore = false
path = "/tmp/navstack-state.json"

[logging]
level = "navstack=debug"
file = "/tmp/navstack.log"
"#,
    );
    let config = Config::load_from(file.path()).unwrap();

    assert_eq!(config.ui.tick_rate_ms, 100);
    assert_eq!(config.ui.frame_rate_ms, 20);
    assert_eq!(config.ui.transition_frames, 0);
    assert!(!config.state.restore);
    assert_eq!(
        config.state.resolved_path(),
        PathBuf::from("/tmp/navstack-state.json")
    );
    assert_eq!(config.logging.level, "navstack=debug");
    assert_eq!(config.logging.resolved_file(), PathBuf::from("/tmp/navstack.log"));
}

/// Test that a partial section keeps defaults for the rest.
#[test]
fn test_partial_section_keeps_defaults() {
    let file = write_config("[ui]\ntransition_frames = 4\n");
    let config = Config::load_from(file.path()).unwrap();
    assert_eq!(config.ui.transition_frames, 4);
    assert_eq!(config.ui.tick_rate_ms, 250);
    assert!(config.state.restore);
}

/// Test that default state and log files live in the data dir.
#[test]
fn test_default_paths_share_data_dir() {
    let config = Config::default();
    let state = config.state.resolved_path();
    let log = config.logging.resolved_file();
    assert!(state.ends_with("navstack/state.json"));
    assert!(log.ends_with("navstack/navstack.log"));
    assert_eq!(state.parent(), log.parent());
}

/// Test that invalid TOML returns ParseError.
#[test]
fn test_invalid_toml_returns_parse_error() {
    let file = write_config("[ui\ntick_rate_ms = ");
    match Config::load_from(file.path()).unwrap_err() {
        ConfigError::ParseError { path, .. } => assert_eq!(path, file.path()),
        other => panic!("Expected ParseError, got {other:?}"),
    }
}

/// Test that a wrongly typed value returns ParseError.
#[test]
fn test_wrong_type_returns_parse_error() {
    let file = write_config("[state]\nrestore = \"yes\"\n");
    assert!(matches!(
        Config::load_from(file.path()),
        Err(ConfigError::ParseError { .. })
    ));
}

/// Test that zero tick rate fails validation.
#[test]
fn test_zero_tick_rate_fails_validation() {
    let file = write_config("[ui]\ntick_rate_ms = 0\n");
    match Config::load_from(file.path()).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("tick_rate_ms"));
        }
        _ => panic!("Expected ValidationError"),
    }
}

/// Test that zero frame rate fails validation.
#[test]
fn test_zero_frame_rate_fails_validation() {
    let file = write_config("[ui]\nframe_rate_ms = 0\n");
    match Config::load_from(file.path()).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("frame_rate_ms"));
        }
        _ => panic!("Expected ValidationError"),
    }
}

/// Test that a blank log level fails validation.
#[test]
fn test_blank_log_level_fails_validation() {
    let file = write_config("[logging]\nlevel = \"  \"\n");
    match Config::load_from(file.path()).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("logging.level"));
        }
        _ => panic!("Expected ValidationError"),
    }
}

/// Test that an unreadable path returns ReadError.
#[test]
fn test_directory_path_returns_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::create_dir(&path).unwrap();
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ReadError { .. })
    ));
}
