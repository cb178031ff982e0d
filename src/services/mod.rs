pub mod conflict_detector;
pub mod deadline_risk;
pub mod energy_scorer;
pub mod event_normalizer;
pub mod preferences_service;
pub mod schedule_optimizer;
pub mod schedule_utils;
pub mod timing_advisor;
pub mod travel_analyzer;
