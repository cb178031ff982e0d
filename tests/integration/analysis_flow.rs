// End-to-end analysis scenarios

use std::sync::Arc;

use schedule_insight_lib::models::optimization::{ImpactLevel, SuggestionType};
use schedule_insight_lib::models::preferences::OptimizerPreferences;
use schedule_insight_lib::models::schedule::{EventCategory, EventPriority, ScheduledItem};
use schedule_insight_lib::services::schedule_optimizer::{analyze_schedule, ScheduleOptimizer};
use schedule_insight_lib::services::schedule_utils;
use serde_json::json;

fn at(hour: u32, minute: u32) -> String {
    format!("2025-06-02T{hour:02}:{minute:02}:00+00:00")
}

fn make_item(id: &str, start: (u32, u32), end: (u32, u32)) -> ScheduledItem {
    ScheduledItem {
        id: id.to_string(),
        title: format!("Item {id}"),
        start_at: at(start.0, start.1),
        end_at: at(end.0, end.1),
        all_day: false,
        location: None,
        category: EventCategory::Work,
        priority: EventPriority::Medium,
    }
}

#[test]
fn half_hour_overlap_yields_one_medium_conflict() {
    let items = vec![
        make_item("a", (10, 0), (11, 0)),
        make_item("b", (10, 30), (11, 30)),
    ];

    let analysis = analyze_schedule(&items, None);
    assert_eq!(analysis.conflicts, 1);

    let conflict = analysis
        .suggestions_of_type(SuggestionType::TimeConflict)
        .next()
        .expect("conflict suggestion");
    assert_eq!(conflict.impact, ImpactLevel::Medium);
    assert!(conflict.description.contains("30 minutes"));
    assert_eq!(conflict.affected_events, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn office_to_court_with_ten_minute_gap_flags_travel() {
    let mut office = make_item("office", (8, 0), (9, 0));
    office.location = Some("Office".to_string());
    let mut court = make_item("court", (9, 10), (10, 0));
    court.location = Some("Court".to_string());
    court.category = EventCategory::Court;

    let analysis = analyze_schedule(&[office, court], None);
    assert_eq!(analysis.travel_time, 45);

    let travel = analysis
        .suggestions_of_type(SuggestionType::TravelTime)
        .next()
        .expect("travel suggestion");
    assert_eq!(travel.impact, ImpactLevel::High);
}

#[test]
fn five_back_to_back_work_items_yield_one_energy_run() {
    let items: Vec<ScheduledItem> = (0..5)
        .map(|idx| make_item(&format!("w{idx}"), (9 + idx, 0), (10 + idx, 0)))
        .collect();
    let preferences = OptimizerPreferences {
        max_consecutive_events: 4,
        ..OptimizerPreferences::default()
    };

    let analysis = analyze_schedule(&items, Some(&preferences));
    let runs: Vec<_> = analysis
        .suggestions_of_type(SuggestionType::EnergyOptimization)
        .collect();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].impact, ImpactLevel::High);
    assert_eq!(runs[0].affected_events.len(), 5);
    assert_eq!(analysis.conflicts, 0);
}

#[test]
fn empty_collection_serializes_to_a_clean_result() {
    let analysis = analyze_schedule(&[], None);
    let value = serde_json::to_value(&analysis).expect("serialize analysis");

    assert_eq!(value["totalEvents"], json!(0));
    assert_eq!(value["conflicts"], json!(0));
    assert_eq!(value["overallScore"], json!(100));
    assert_eq!(value["optimizations"], json!([]));
    assert!(analysis.recommendations[0].contains("excellent"));
}

#[test]
fn three_close_urgent_items_raise_both_deadline_checks() {
    let items: Vec<ScheduledItem> = (0..3)
        .map(|idx| {
            let mut item = make_item(&format!("u{idx}"), (10 + idx, 0), (10 + idx, 30));
            item.priority = EventPriority::Urgent;
            item
        })
        .collect();

    let analysis = analyze_schedule(&items, None);
    let deadline: Vec<_> = analysis
        .suggestions_of_type(SuggestionType::DeadlineRisk)
        .collect();

    assert!(deadline.iter().any(|s| s.affected_events.len() == 3));
    assert!(deadline.iter().any(|s| s.affected_events.len() == 2));
    assert!(analysis.deadline_risk > 0);
}

#[test]
fn all_day_urgent_item_is_not_back_to_back_with_a_timed_hearing() {
    let mut filing = make_item("filing-day", (0, 0), (23, 59));
    filing.all_day = true;
    filing.priority = EventPriority::Urgent;
    let mut hearing = make_item("hearing", (14, 0), (15, 0));
    hearing.priority = EventPriority::Urgent;
    hearing.category = EventCategory::Court;

    let analysis = analyze_schedule(&[filing, hearing], None);
    assert_eq!(analysis.deadline_risk, 40);
    assert!(analysis
        .suggestions_of_type(SuggestionType::DeadlineRisk)
        .all(|s| !s.title.contains("back to back")));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let mut items = vec![
        make_item("a", (10, 0), (11, 0)),
        make_item("b", (10, 30), (11, 30)),
        make_item("c", (6, 0), (8, 0)),
    ];
    items[2].location = Some("Home".to_string());
    items[0].location = Some("Office".to_string());
    items[1].priority = EventPriority::Urgent;

    let optimizer = ScheduleOptimizer::default();
    let first = serde_json::to_string(&optimizer.analyze(&items)).expect("serialize");
    let second = serde_json::to_string(&optimizer.analyze(&items)).expect("serialize");
    assert_eq!(first, second);
}

#[test]
fn conflicts_match_half_open_overlap_for_every_pair() {
    // Quarter-hour grid of short items on one morning.
    let windows = [
        ((9, 0), (9, 30)),
        ((9, 30), (10, 0)),
        ((9, 15), (9, 45)),
        ((10, 0), (11, 0)),
        ((10, 45), (11, 15)),
        ((11, 15), (11, 15)),
        ((8, 0), (12, 0)),
    ];
    let items: Vec<ScheduledItem> = windows
        .iter()
        .enumerate()
        .map(|(idx, (start, end))| make_item(&format!("i{idx}"), *start, *end))
        .collect();

    let mut expected = 0;
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            let (si, ei) = (
                schedule_utils::parse_datetime(&items[i].start_at).expect("start"),
                schedule_utils::parse_datetime(&items[i].end_at).expect("end"),
            );
            let (sj, ej) = (
                schedule_utils::parse_datetime(&items[j].start_at).expect("start"),
                schedule_utils::parse_datetime(&items[j].end_at).expect("end"),
            );
            if si < ej && sj < ei {
                expected += 1;
            }
        }
    }

    let analysis = analyze_schedule(&items, None);
    assert_eq!(analysis.conflicts, expected);
}

#[test]
fn overall_score_stays_within_bounds_for_a_chaotic_day() {
    let items: Vec<ScheduledItem> = (0..12)
        .map(|idx| {
            let mut item = make_item(&format!("x{idx}"), (6 + idx, 0), (8 + idx, 0));
            item.priority = EventPriority::Urgent;
            item.location = Some(if idx % 2 == 0 { "Court" } else { "Hospital" }.to_string());
            item
        })
        .collect();

    let analysis = analyze_schedule(&items, None);
    assert!(analysis.overall_score <= 100);
    assert_eq!(analysis.overall_score, 0);
    assert!(analysis.energy_score <= 100);
    assert!(analysis.deadline_risk <= 100);
    assert!(analysis.recommendations[0].contains("needs significant optimization"));
}

#[test]
fn packing_more_items_never_raises_energy() {
    let preferences = OptimizerPreferences::default();
    let mut previous = 100;
    for count in 1..=8u32 {
        let items: Vec<ScheduledItem> = (0..count)
            .map(|idx| make_item(&format!("p{idx}"), (9 + idx, 0), (10 + idx, 0)))
            .collect();
        let energy = analyze_schedule(&items, Some(&preferences)).energy_score;
        assert!(energy <= previous, "energy rose from {previous} to {energy}");
        previous = energy;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_get_identical_results() {
    let optimizer = Arc::new(ScheduleOptimizer::default());
    let items = Arc::new(vec![
        make_item("a", (10, 0), (11, 0)),
        make_item("b", (10, 30), (11, 30)),
        make_item("c", (11, 30), (12, 30)),
    ]);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let optimizer = Arc::clone(&optimizer);
            let items = Arc::clone(&items);
            tokio::task::spawn_blocking(move || optimizer.analyze(&items))
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.expect("analysis task panicked"));
    }
    for result in &results[1..] {
        assert_eq!(result, &results[0]);
    }
}
