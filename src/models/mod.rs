pub mod optimization;
pub mod preferences;
pub mod schedule;
