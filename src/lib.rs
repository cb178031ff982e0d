//! Schedule conflict and optimization analysis.
//!
//! The engine is a pure, synchronous computation: hand it a snapshot of
//! scheduled items and it returns a [`ScheduleAnalysis`] with scores and
//! ranked suggestions. It keeps no state between calls and never mutates its
//! inputs, so a single [`ScheduleOptimizer`] can be shared across threads.

pub mod error;
pub mod models;
pub mod services;
pub mod tools;
pub mod utils;

pub use error::{AppError, AppResult};
pub use models::optimization::{
    AlternativeTime, EscalationLevel, ImpactLevel, OptimizationSuggestion, ScheduleAnalysis,
    SuggestedAction, SuggestionType,
};
pub use models::preferences::{
    EnergyLevels, OptimizerPreferences, PreferencesUpdate, TimeOfDay, WorkHours,
};
pub use models::schedule::{EventCategory, EventPriority, ScheduledItem};
pub use services::schedule_optimizer::{analyze_schedule, ScheduleOptimizer};
pub use services::travel_analyzer::{HeuristicTravelEstimator, TravelEstimator};
