// Error handling and edge case tests

use schedule_insight_lib::models::optimization::{ImpactLevel, SuggestionType};
use schedule_insight_lib::models::preferences::{OptimizerPreferences, WorkHours};
use schedule_insight_lib::models::schedule::{EventCategory, EventPriority, ScheduledItem};
use schedule_insight_lib::services::schedule_optimizer::{analyze_schedule, ScheduleOptimizer};

fn make_item(id: &str, start_at: &str, end_at: &str) -> ScheduledItem {
    ScheduledItem {
        id: id.to_string(),
        title: format!("Item {id}"),
        start_at: start_at.to_string(),
        end_at: end_at.to_string(),
        all_day: false,
        location: None,
        category: EventCategory::Work,
        priority: EventPriority::Medium,
    }
}

#[test]
fn test_missing_and_unparsable_dates_are_reported_not_thrown() {
    let items = vec![
        make_item("no-start", "", "2025-06-02T10:00:00+00:00"),
        make_item("bad-end", "2025-06-02T09:00:00+00:00", "half past nine"),
        make_item("fine", "2025-06-02T09:00:00+00:00", "2025-06-02T10:00:00+00:00"),
    ];

    let analysis = analyze_schedule(&items, None);
    assert_eq!(analysis.total_events, 3);
    assert_eq!(analysis.conflicts, 0);

    let invalid: Vec<_> = analysis
        .suggestions_of_type(SuggestionType::InvalidItem)
        .collect();
    assert_eq!(invalid.len(), 2);
    for suggestion in invalid {
        assert_eq!(suggestion.impact, ImpactLevel::Low);
        assert!(suggestion.confidence < 0.5);
        assert!(suggestion.alternative_times.is_empty());
    }
}

#[test]
fn test_inverted_interval_is_excluded_from_overlap_math() {
    let items = vec![
        make_item("inverted", "2025-06-02T12:00:00+00:00", "2025-06-02T09:00:00+00:00"),
        make_item("normal", "2025-06-02T10:00:00+00:00", "2025-06-02T11:00:00+00:00"),
    ];

    let analysis = analyze_schedule(&items, None);
    assert_eq!(analysis.conflicts, 0);
    let warning = analysis
        .suggestions_of_type(SuggestionType::InvalidItem)
        .next()
        .expect("inverted interval should be reported");
    assert!(warning.description.contains("precedes"));
}

#[test]
fn test_mixed_offsets_compare_by_instant() {
    // 10:00+02:00 is 08:00 UTC and overlaps 08:30-09:30 UTC.
    let items = vec![
        make_item("berlin", "2025-06-02T10:00:00+02:00", "2025-06-02T11:00:00+02:00"),
        make_item("london", "2025-06-02T08:30:00+00:00", "2025-06-02T09:30:00+00:00"),
    ];

    let analysis = analyze_schedule(&items, None);
    assert_eq!(analysis.conflicts, 1);
}

#[test]
fn test_input_collection_is_not_mutated() {
    let items = vec![
        make_item("late", "2025-06-02T15:00:00+00:00", "2025-06-02T16:00:00+00:00"),
        make_item("early", "2025-06-02T09:00:00+00:00", "2025-06-02T10:00:00+00:00"),
    ];
    let snapshot = items.clone();

    let _ = analyze_schedule(&items, None);
    assert_eq!(items, snapshot);
}

#[test]
fn test_invalid_preferences_fail_fast() {
    let preferences = OptimizerPreferences {
        work_hours: WorkHours { start: 9, end: 30 },
        ..OptimizerPreferences::default()
    };
    let err = match ScheduleOptimizer::new(preferences) {
        Ok(_) => panic!("invalid work hours should be rejected"),
        Err(err) => err,
    };
    assert!(err.is_validation());
}

#[test]
fn test_degenerate_preferences_still_analyze() {
    // Override values bypass construction-time validation; the engine clamps them.
    let preferences = OptimizerPreferences {
        preferred_break_minutes: -10,
        max_consecutive_events: 0,
        travel_buffer_minutes: -5,
        ..OptimizerPreferences::default()
    };
    let items = vec![
        make_item("a", "2025-06-02T09:00:00+00:00", "2025-06-02T10:00:00+00:00"),
        make_item("b", "2025-06-02T10:00:00+00:00", "2025-06-02T11:00:00+00:00"),
    ];

    let analysis = ScheduleOptimizer::default().analyze_with_preferences(&items, &preferences);
    assert!(analysis.overall_score <= 100);
    assert!(analysis.energy_score <= 100);
}

#[test]
fn test_oversized_override_preferences_do_not_panic() {
    // Per-call overrides skip validation, so extreme values must saturate.
    let preferences = OptimizerPreferences {
        preferred_break_minutes: i64::MAX,
        max_consecutive_events: 1,
        travel_buffer_minutes: i64::MAX,
        ..OptimizerPreferences::default()
    };
    let mut office = make_item("office", "2025-06-02T08:00:00+00:00", "2025-06-02T09:00:00+00:00");
    office.location = Some("Office".to_string());
    let mut court = make_item("court", "2025-06-02T09:10:00+00:00", "2025-06-02T10:00:00+00:00");
    court.location = Some("Court".to_string());
    let mut back = make_item("back", "2025-06-02T10:00:00+00:00", "2025-06-02T11:00:00+00:00");
    back.location = Some("Office".to_string());
    let items = vec![office, court, back];

    let analysis = analyze_schedule(&items, Some(&preferences));
    assert_eq!(analysis.travel_time, 90);
    assert!(analysis
        .suggestions_of_type(SuggestionType::TravelTime)
        .next()
        .is_some());
    assert!(analysis
        .suggestions_of_type(SuggestionType::EnergyOptimization)
        .next()
        .is_some());
    assert!(analysis.overall_score <= 100);
    assert!(analysis.energy_score <= 100);
}
