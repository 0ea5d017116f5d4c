mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{data_dir, Config, LoggingConfig, StateConfig, UiConfig};
