use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Event loop and animation timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick interval in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Tick interval while a transition runs, in milliseconds (default: 16).
    #[serde(default = "default_frame_rate_ms")]
    pub frame_rate_ms: u64,
    /// Length of the slide transition in frames. 0 disables it (default: 12).
    #[serde(default = "default_transition_frames")]
    pub transition_frames: u16,
}

/// Navigation state restoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Restore the saved stack on start (default: true).
    #[serde(default = "default_restore")]
    pub restore: bool,
    /// State file override. Defaults to `<data dir>/navstack/state.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file override. Defaults to `<data dir>/navstack/navstack.log`.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_frame_rate_ms() -> u64 {
    16
}

fn default_transition_frames() -> u16 {
    12
}

fn default_restore() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            frame_rate_ms: default_frame_rate_ms(),
            transition_frames: default_transition_frames(),
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            restore: default_restore(),
            path: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn frame_rate(&self) -> Duration {
        Duration::from_millis(self.frame_rate_ms)
    }
}

/// Per-user data directory for state and logs.
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("navstack")
}

impl StateConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| data_dir().join("state.json"))
    }
}

impl LoggingConfig {
    pub fn resolved_file(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| data_dir().join("navstack.log"))
    }
}
