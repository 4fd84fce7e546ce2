//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Loop timer work/rest lengths
//! - Cue output (bell, sound file directories, volume)
//! - The routine `sprintloop run` uses when none is given
//!
//! Configuration is stored at `~/.config/sprintloop/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::{LoopConfig, RoutineId, DEFAULT_REST_SECS, DEFAULT_WORK_SECS};

/// Loop timer defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopSettings {
    #[serde(default = "default_work_secs")]
    pub work_secs: u32,
    #[serde(default = "default_rest_secs")]
    pub rest_secs: u32,
}

/// Cue output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CueConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Ring the terminal bell when no sound files are used.
    #[serde(default = "default_true")]
    pub bell: bool,
    /// Directories searched, in order, for `beep.wav` and `buzzer.wav`.
    #[serde(default = "default_sound_dirs")]
    pub sound_dirs: Vec<String>,
    #[serde(default = "default_volume")]
    pub volume: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/sprintloop/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_routine")]
    pub default_routine: RoutineId,
    #[serde(default, rename = "loop")]
    pub looping: LoopSettings,
    #[serde(default)]
    pub cues: CueConfig,
}

// Default functions
fn default_work_secs() -> u32 {
    DEFAULT_WORK_SECS
}
fn default_rest_secs() -> u32 {
    DEFAULT_REST_SECS
}
fn default_true() -> bool {
    true
}
fn default_sound_dirs() -> Vec<String> {
    vec!["/storage/emulated/0/Download".into(), ".".into()]
}
fn default_volume() -> u32 {
    80
}
fn default_routine() -> RoutineId {
    RoutineId::Structured20
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            work_secs: default_work_secs(),
            rest_secs: default_rest_secs(),
        }
    }
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bell: true,
            sound_dirs: default_sound_dirs(),
            volume: default_volume(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_routine: default_routine(),
            looping: LoopSettings::default(),
            cues: CueConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing the defaults there when the file is missing.
    /// An existing file that cannot be read is left untouched.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(source) => Err(ConfigError::ReadFailed {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = self.to_toml().map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// The file contents `save_to` would write.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key in memory. Returns error if the key is
    /// unknown or the value does not fit the field.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Loop lengths with zero values replaced by the defaults.
    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig::new(self.looping.work_secs, self.looping.rest_secs)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.looping.work_secs, 30);
        assert_eq!(parsed.looping.rest_secs, 2);
        assert_eq!(parsed.default_routine, RoutineId::Structured20);
    }

    #[test]
    fn loop_section_is_named_loop() {
        let cfg: Config = toml::from_str("[loop]\nwork_secs = 40\n").unwrap();
        assert_eq!(cfg.looping.work_secs, 40);
        assert_eq!(cfg.looping.rest_secs, 2);
        assert!(cfg.cues.enabled);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("loop.work_secs").as_deref(), Some("30"));
        assert_eq!(cfg.get("cues.bell").as_deref(), Some("true"));
        assert_eq!(cfg.get("default_routine").as_deref(), Some("20-minute"));
        assert!(cfg.get("loop.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_nested_number() {
        let mut cfg = Config::default();
        cfg.apply("loop.rest_secs", "15").unwrap();
        assert_eq!(cfg.looping.rest_secs, 15);
        assert_eq!(cfg.loop_config().rest_secs(), 15);
    }

    #[test]
    fn apply_updates_nested_bool() {
        let mut cfg = Config::default();
        cfg.apply("cues.enabled", "false").unwrap();
        assert!(!cfg.cues.enabled);
    }

    #[test]
    fn apply_updates_list() {
        let mut cfg = Config::default();
        cfg.apply("cues.sound_dirs", r#"["/tmp/sounds"]"#).unwrap();
        assert_eq!(cfg.cues.sound_dirs, vec!["/tmp/sounds".to_string()]);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("loop.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn apply_rejects_non_numeric_duration() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("loop.work_secs", "thirty"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg.looping.work_secs, 30);
    }

    #[test]
    fn apply_rejects_unknown_routine() {
        let mut cfg = Config::default();
        assert!(cfg.apply("default_routine", "tabata").is_err());
        assert_eq!(cfg.default_routine, RoutineId::Structured20);
    }

    #[test]
    fn zero_loop_lengths_fall_back() {
        let mut cfg = Config::default();
        cfg.looping.work_secs = 0;
        assert_eq!(cfg.loop_config().work_secs(), DEFAULT_WORK_SECS);
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.looping.work_secs, 30);
        assert!(path.exists());
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "loop = [[[").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::ParseFailed(_))));
    }

    #[test]
    fn load_from_leaves_unreadable_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let bytes = b"default_routine = \"7-4-2-1-1\"\n# caf\xe9\n";
        std::fs::write(&path, bytes).unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ReadFailed { .. })
        ));
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn to_toml_has_loop_table() {
        let text = Config::default().to_toml().unwrap();
        assert!(text.contains("[loop]"));
        assert!(text.contains("work_secs = 30"));
    }

    #[test]
    fn save_to_then_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.apply("default_routine", "7-4-2-1-1").unwrap();
        cfg.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_routine, RoutineId::SevenFourTwoOneOne);
    }
}
