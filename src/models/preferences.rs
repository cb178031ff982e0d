use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const DEFAULT_WORK_START_HOUR: u32 = 9;
const DEFAULT_WORK_END_HOUR: u32 = 17;
const DEFAULT_BREAK_MINUTES: i64 = 15;
const DEFAULT_MAX_CONSECUTIVE_EVENTS: usize = 4;
const DEFAULT_TRAVEL_BUFFER_MINUTES: i64 = 15;
/// Upper bound for break and travel buffer lengths: one full day.
pub const MAX_PREFERENCE_MINUTES: i64 = 1440;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkHours {
    pub start: u32,
    pub end: u32,
}

impl WorkHours {
    /// Inclusive on both ends.
    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.start && hour <= self.end
    }
}

impl Default for WorkHours {
    fn default() -> Self {
        Self {
            start: DEFAULT_WORK_START_HOUR,
            end: DEFAULT_WORK_END_HOUR,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }
}

/// Relative energy available at each part of the day; lower means a run of
/// back-to-back items costs more.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnergyLevels {
    pub morning: f64,
    pub afternoon: f64,
    pub evening: f64,
}

impl EnergyLevels {
    pub fn multiplier_for(&self, time_of_day: TimeOfDay) -> f64 {
        match time_of_day {
            TimeOfDay::Morning => self.morning,
            TimeOfDay::Afternoon => self.afternoon,
            TimeOfDay::Evening => self.evening,
        }
    }
}

impl Default for EnergyLevels {
    fn default() -> Self {
        Self {
            morning: 1.0,
            afternoon: 0.8,
            evening: 0.6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizerPreferences {
    pub work_hours: WorkHours,
    pub preferred_break_minutes: i64,
    pub max_consecutive_events: usize,
    pub travel_buffer_minutes: i64,
    pub energy_levels: EnergyLevels,
}

impl Default for OptimizerPreferences {
    fn default() -> Self {
        Self {
            work_hours: WorkHours::default(),
            preferred_break_minutes: DEFAULT_BREAK_MINUTES,
            max_consecutive_events: DEFAULT_MAX_CONSECUTIVE_EVENTS,
            travel_buffer_minutes: DEFAULT_TRAVEL_BUFFER_MINUTES,
            energy_levels: EnergyLevels::default(),
        }
    }
}

impl OptimizerPreferences {
    pub fn validate(&self) -> AppResult<()> {
        if self.work_hours.start > 23 || self.work_hours.end > 23 {
            return Err(AppError::validation("work hours must be between 0 and 23"));
        }
        if self.work_hours.start > self.work_hours.end {
            return Err(AppError::validation(
                "work hours start must not be later than end",
            ));
        }
        if !(0..=MAX_PREFERENCE_MINUTES).contains(&self.preferred_break_minutes) {
            return Err(AppError::validation(format!(
                "preferred break length must be between 0 and {MAX_PREFERENCE_MINUTES} minutes"
            )));
        }
        if !(0..=MAX_PREFERENCE_MINUTES).contains(&self.travel_buffer_minutes) {
            return Err(AppError::validation(format!(
                "travel buffer must be between 0 and {MAX_PREFERENCE_MINUTES} minutes"
            )));
        }
        if self.max_consecutive_events == 0 {
            return Err(AppError::validation(
                "max consecutive events must be at least 1",
            ));
        }
        let levels = [
            ("morning", self.energy_levels.morning),
            ("afternoon", self.energy_levels.afternoon),
            ("evening", self.energy_levels.evening),
        ];
        for (label, value) in levels {
            if !value.is_finite() || value <= 0.0 {
                return Err(AppError::validation(format!(
                    "{label} energy multiplier must be a positive number"
                )));
            }
        }
        Ok(())
    }
}

/// Partial override; `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    #[serde(default)]
    pub work_hours: Option<WorkHours>,
    #[serde(default)]
    pub preferred_break_minutes: Option<i64>,
    #[serde(default)]
    pub max_consecutive_events: Option<usize>,
    #[serde(default)]
    pub travel_buffer_minutes: Option<i64>,
    #[serde(default)]
    pub energy_levels: Option<EnergyLevels>,
}
