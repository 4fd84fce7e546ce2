//! `sprintloop config`: read and edit `config.toml`.
//!
//! Loop lengths are stored as typed, but the timers treat 0 as "use the
//! default", so edits under `loop.` echo the lengths that will actually run.

use clap::Subcommand;
use sprintloop_core::{Config, ConfigError, LoopConfig, Result};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "loop.work_secs", "cues.bell")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// Print the config file location and contents
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            tracing::info!(%key, %value, "config updated");
            if key.starts_with("loop.") {
                println!("{key} = {value} ({})", effective(&config.loop_config()));
            } else {
                println!("{key} = {value}");
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let text = config
                .to_toml()
                .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
            println!("# {}", Config::path()?.display());
            print!("{text}");
            println!("# {}", effective(&config.loop_config()));
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}

fn effective(loop_config: &LoopConfig) -> String {
    format!(
        "loop runs work {}s / rest {}s",
        loop_config.work_secs(),
        loop_config.rest_secs()
    )
}
