mod config;
mod profile;

pub use config::{Config, CueConfig, LoopSettings};
pub use profile::{Profile, MAX_WEEK, MIN_WEEK};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/sprintloop[-dev]/` based on SPRINTLOOP_ENV.
///
/// Set SPRINTLOOP_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SPRINTLOOP_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("sprintloop-dev")
    } else {
        base_dir.join("sprintloop")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
