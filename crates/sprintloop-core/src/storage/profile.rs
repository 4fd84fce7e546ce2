//! Rehab training profile.
//!
//! A small JSON document holding the programme week (1..=6) and the
//! one-rep max for each weighted exercise. Missing or corrupt files load as
//! the default profile; the caller saves after every edit.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, ProfileError, ValidationError};

pub const MIN_WEEK: u8 = 1;
pub const MAX_WEEK: u8 = 6;

const DEFAULT_MAXES: [(&str, f64); 10] = [
    ("Hack Squat", 95.0),
    ("Trap Bar Farmers Walk", 125.0),
    ("Dumbbell Bench Press", 50.0),
    ("Cable Row", 35.0),
    ("Unilateral Leg Press", 50.0),
    ("Tricep Pushdowns", 25.0),
    ("Cable Woodchoppers", 20.0),
    ("Leg Extension", 35.0),
    ("Seated Leg Curl", 35.0),
    ("Cable Face Pulls", 25.0),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    current_week: u8,
    maxes: BTreeMap<String, f64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            current_week: MIN_WEEK,
            maxes: DEFAULT_MAXES
                .iter()
                .map(|&(name, max)| (name.to_string(), max))
                .collect(),
        }
    }
}

impl Profile {
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("profile.json"))
    }

    /// Read `path`; a missing, unreadable or malformed file yields the
    /// default profile.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "profile unreadable, using defaults");
                }
                return Self::default();
            }
        };
        match serde_json::from_str::<Profile>(&content) {
            Ok(mut profile) => {
                profile.current_week = profile.current_week.clamp(MIN_WEEK, MAX_WEEK);
                profile
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "profile corrupt, using defaults");
                Self::default()
            }
        }
    }

    /// Load from the data directory, never failing.
    pub fn load_or_default() -> Self {
        match Self::path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::warn!(error = %e, "profile location unavailable, using defaults");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ProfileError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ProfileError::SaveFailed {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        std::fs::write(path, json).map_err(|source| ProfileError::SaveFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    // ── Week ─────────────────────────────────────────────────────────

    pub fn week(&self) -> u8 {
        self.current_week
    }

    /// Advance one week, wrapping 6 back to 1.
    pub fn next_week(&mut self) -> u8 {
        self.current_week = self.current_week % MAX_WEEK + 1;
        self.current_week
    }

    /// Go back one week, wrapping 1 to 6.
    pub fn prev_week(&mut self) -> u8 {
        self.current_week = if self.current_week <= MIN_WEEK {
            MAX_WEEK
        } else {
            self.current_week - 1
        };
        self.current_week
    }

    pub fn set_week(&mut self, week: i64) -> Result<(), ValidationError> {
        let valid = u8::try_from(week)
            .ok()
            .filter(|w| (MIN_WEEK..=MAX_WEEK).contains(w))
            .ok_or(ValidationError::OutOfRange {
                field: "current_week".into(),
                value: week,
                min: i64::from(MIN_WEEK),
                max: i64::from(MAX_WEEK),
            })?;
        self.current_week = valid;
        Ok(())
    }

    // ── Maxes ────────────────────────────────────────────────────────

    pub fn maxes(&self) -> &BTreeMap<String, f64> {
        &self.maxes
    }

    pub fn max(&self, exercise: &str) -> Option<f64> {
        self.maxes.get(exercise).copied()
    }

    /// Update the one-rep max of a tracked exercise.
    pub fn set_max(&mut self, exercise: &str, value: f64) -> Result<(), ProfileError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ProfileError::InvalidMax {
                exercise: exercise.to_string(),
                value,
            });
        }
        let slot = self
            .maxes
            .get_mut(exercise)
            .ok_or_else(|| ProfileError::UnknownExercise(exercise.to_string()))?;
        *slot = value;
        Ok(())
    }

    /// 80% of the max plus 2.5 lbs per week past the first, rounded down.
    pub fn working_weight(&self, exercise: &str) -> Option<u32> {
        let max = self.max(exercise)?;
        let weeks = f64::from(self.current_week.saturating_sub(1));
        Some((max * 0.80 + weeks * 2.5).floor() as u32)
    }

    /// `"@ 76 lbs"`, or an empty string for untracked exercises.
    pub fn weight_label(&self, exercise: &str) -> String {
        self.working_weight(exercise)
            .map(|w| format!("@ {w} lbs"))
            .unwrap_or_default()
    }
}
