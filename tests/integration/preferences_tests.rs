// Preference loading tests

use schedule_insight_lib::models::preferences::{OptimizerPreferences, PreferencesUpdate, WorkHours};
use schedule_insight_lib::services::schedule_optimizer::ScheduleOptimizer;
use tempfile::tempdir;

#[test]
fn test_load_json_preferences_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("optimizer.json");
    std::fs::write(
        &path,
        r#"{"workHours": {"start": 8, "end": 16}, "travelBufferMinutes": 5}"#,
    )
    .expect("write preferences");

    let prefs = OptimizerPreferences::load_from_path(&path).expect("load json");
    assert_eq!(prefs.work_hours, WorkHours { start: 8, end: 16 });
    assert_eq!(prefs.travel_buffer_minutes, 5);
    assert_eq!(prefs.max_consecutive_events, 4);
}

#[test]
fn test_load_yaml_preferences_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("optimizer.yml");
    std::fs::write(
        &path,
        "preferredBreakMinutes: 20\nenergyLevels:\n  morning: 1.2\n  afternoon: 0.9\n  evening: 0.5\n",
    )
    .expect("write preferences");

    let prefs = OptimizerPreferences::load_from_path(&path).expect("load yaml");
    assert_eq!(prefs.preferred_break_minutes, 20);
    assert_eq!(prefs.energy_levels.morning, 1.2);

    let optimizer = ScheduleOptimizer::new(prefs).expect("valid preferences");
    assert_eq!(optimizer.preferences().preferred_break_minutes, 20);
}

#[test]
fn test_unsupported_extension_and_missing_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("optimizer.toml");
    std::fs::write(&path, "travelBufferMinutes = 5").expect("write preferences");

    let err = OptimizerPreferences::load_from_path(&path).expect_err("toml is not supported");
    assert!(err.is_validation());
    assert!(err.validation_details().is_some());

    let missing = dir.path().join("absent.json");
    assert!(OptimizerPreferences::load_from_path(&missing).is_err());
}

#[test]
fn test_malformed_json_is_a_serialization_error() {
    let err = OptimizerPreferences::from_json_str("{ not json").expect_err("must fail");
    assert!(!err.is_validation());
}

#[test]
fn test_update_chain_keeps_each_snapshot() {
    let base = OptimizerPreferences::default();
    let first = base
        .apply_update(&PreferencesUpdate {
            max_consecutive_events: Some(2),
            ..PreferencesUpdate::default()
        })
        .expect("first update");
    let second = first
        .apply_update(&PreferencesUpdate {
            work_hours: Some(WorkHours { start: 7, end: 15 }),
            ..PreferencesUpdate::default()
        })
        .expect("second update");

    assert_eq!(base.max_consecutive_events, 4);
    assert_eq!(first.work_hours, WorkHours::default());
    assert_eq!(second.max_consecutive_events, 2);
    assert_eq!(second.work_hours.start, 7);
}
