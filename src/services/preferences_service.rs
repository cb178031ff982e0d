use std::path::Path;

use serde_json::json;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::preferences::{OptimizerPreferences, PreferencesUpdate};

impl OptimizerPreferences {
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        let preferences: OptimizerPreferences = serde_json::from_str(raw)?;
        preferences.validate()?;
        Ok(preferences)
    }

    pub fn from_yaml_str(raw: &str) -> AppResult<Self> {
        let preferences: OptimizerPreferences = serde_yaml::from_str(raw)?;
        preferences.validate()?;
        Ok(preferences)
    }

    /// Loads preferences from a `.json`, `.yaml` or `.yml` file. Fields
    /// missing from the file keep their defaults.
    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let preferences = match extension.as_deref() {
            Some("json") => Self::from_json_str(&raw)?,
            Some("yaml") | Some("yml") => Self::from_yaml_str(&raw)?,
            other => {
                warn!(target: "app::config", path = %path.display(), "unsupported preferences file");
                return Err(AppError::validation_with_details(
                    "unsupported preferences file format",
                    json!({"path": path.display().to_string(), "extension": other}),
                ));
            }
        };

        debug!(target: "app::config", path = %path.display(), "preferences loaded");
        Ok(preferences)
    }

    /// Returns a new validated value with the update applied; `self` is left
    /// untouched.
    pub fn apply_update(&self, update: &PreferencesUpdate) -> AppResult<Self> {
        let mut next = self.clone();
        if let Some(work_hours) = update.work_hours {
            next.work_hours = work_hours;
        }
        if let Some(minutes) = update.preferred_break_minutes {
            next.preferred_break_minutes = minutes;
        }
        if let Some(max) = update.max_consecutive_events {
            next.max_consecutive_events = max;
        }
        if let Some(minutes) = update.travel_buffer_minutes {
            next.travel_buffer_minutes = minutes;
        }
        if let Some(levels) = update.energy_levels {
            next.energy_levels = levels;
        }
        next.validate()?;
        Ok(next)
    }
}
