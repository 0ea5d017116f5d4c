use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use navstack::config::Config;
use navstack::logging::init_tracing;
use navstack::navigation::{ComponentContext, SavedState};
use navstack::persistence;
use navstack::ui::app::{App, ExitReason};
use navstack::ui::runtime;

#[derive(Debug, Parser)]
#[command(name = "navstack", version, about = "Two-screen navigation demo")]
struct Args {
    /// Config file (default: <config dir>/navstack/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// State file override
    #[arg(long, value_name = "PATH")]
    state_file: Option<PathBuf>,

    /// Start from the first screen, ignoring saved state
    #[arg(long)]
    fresh: bool,

    /// Log filter when RUST_LOG is unset (e.g. "debug", "navstack=trace")
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(path) = args.state_file {
        config.state.path = Some(path);
    }

    let log_path = init_tracing(&config.logging).context("initializing logging")?;
    tracing::info!(config = %config_path.display(), log = %log_path.display(), "starting");

    let state_path = config.state.resolved_path();
    let restored = if args.fresh || !config.state.restore {
        None
    } else {
        load_saved_state(&state_path)
    };

    let context = ComponentContext::root(restored);
    context.lifecycle().resume();
    let mut app = App::new(context.clone(), &config.ui);
    let reason = runtime::run(&mut app, &config.ui).context("running terminal UI")?;

    // Collected before `app` drops: disposing the stack withdraws its state.
    match reason {
        ExitReason::Back => {
            persistence::clear(&state_path).context("clearing saved state")?;
        }
        ExitReason::Quit => {
            let saved = app.save_state().context("collecting navigation state")?;
            persistence::save(&state_path, &saved).context("writing navigation state")?;
            tracing::info!(path = %state_path.display(), "navigation state saved");
        }
    }
    drop(app);
    context.lifecycle().destroy();
    Ok(())
}

/// A broken state file is not fatal; the app starts fresh instead.
fn load_saved_state(path: &std::path::Path) -> Option<SavedState> {
    match persistence::load(path) {
        Ok(state) => state,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring saved navigation state");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn parse_defaults() {
        let args = Args::try_parse_from(["navstack"]).unwrap();
        assert!(args.config.is_none());
        assert!(!args.fresh);
    }

    #[test]
    fn parse_overrides() {
        let args = Args::try_parse_from([
            "navstack",
            "--fresh",
            "--state-file",
            "/tmp/s.json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert!(args.fresh);
        assert_eq!(args.state_file.unwrap().to_str(), Some("/tmp/s.json"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}
