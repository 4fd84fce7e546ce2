//! Core error types for sprintloop-core.
//!
//! The timer engines themselves never fail for in-range input; these errors
//! cover routine construction, configuration and the rehab profile.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for sprintloop-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rehab profile errors
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Routine construction errors
    #[error("Routine error: {0}")]
    Routine(#[from] RoutineError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Config file exists but could not be read
    #[error("Failed to read configuration from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Home/config directory could not be prepared
    #[error("Configuration directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Rehab profile errors.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to save profile to {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    #[error("Invalid max for {exercise}: {value}")]
    InvalidMax { exercise: String, value: f64 },
}

/// Routine construction errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutineError {
    /// A routine needs at least one phase
    #[error("routine has no phases")]
    Empty,

    /// DONE appears somewhere other than the final slot
    #[error("DONE phase at index {index} is not the last of {len} phases")]
    DoneNotLast { index: usize, len: usize },

    /// DONE always lasts zero seconds
    #[error("DONE phase must have zero duration, got {duration}s")]
    DoneWithDuration { duration: u32 },

    /// No routine registered under this identifier
    #[error("unknown routine '{0}'")]
    UnknownRoutine(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Value outside the accepted range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
