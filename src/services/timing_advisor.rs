use std::collections::BTreeSet;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::optimization::{
    AlternativeTime, ImpactLevel, OptimizationSuggestion, SuggestionType,
};
use crate::models::schedule::EventCategory;
use crate::services::event_normalizer::TimedEvent;
use crate::services::schedule_utils;

const TIMING_CONFIDENCE: f64 = 0.7;
const DURATION_CONFIDENCE: f64 = 0.6;
const MAX_HOUR_DISTANCE: u32 = 2;
const DURATION_TOLERANCE_MINUTES: i64 = 15;
const QUICK_MINUTES: i64 = 15;
const CALL_MINUTES: i64 = 30;

static QUICK_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bquick\b").expect("quick pattern is valid"));
static CALL_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bcall\b").expect("call pattern is valid"));

pub fn optimal_hours(category: EventCategory) -> &'static [u32] {
    match category {
        EventCategory::Work => &[9, 10, 14, 15],
        EventCategory::Court => &[9, 10, 11],
        EventCategory::Family => &[17, 18, 19],
        EventCategory::Personal => &[7, 8, 18, 19],
        EventCategory::Recovery => &[7, 12, 20],
        EventCategory::Other => &[],
    }
}

pub fn optimal_duration(category: EventCategory) -> Option<i64> {
    match category {
        EventCategory::Work => Some(60),
        EventCategory::Court => Some(120),
        EventCategory::Family => Some(90),
        EventCategory::Personal => Some(60),
        EventCategory::Recovery => Some(45),
        EventCategory::Other => None,
    }
}

/// Title keywords take precedence over the category table.
pub fn expected_duration(title: &str, category: EventCategory) -> Option<i64> {
    if QUICK_TITLE.is_match(title) {
        Some(QUICK_MINUTES)
    } else if CALL_TITLE.is_match(title) {
        Some(CALL_MINUTES)
    } else {
        optimal_duration(category)
    }
}

pub fn advise_timing(events: &[TimedEvent<'_>]) -> Vec<OptimizationSuggestion> {
    let occupied: BTreeSet<(NaiveDate, u32)> = events
        .iter()
        .map(|event| (event.start.date_naive(), schedule_utils::hour_of(event.start)))
        .collect();

    events
        .iter()
        .filter_map(|event| timing_suggestion(event, &occupied))
        .collect()
}

pub fn advise_duration(events: &[TimedEvent<'_>]) -> Vec<OptimizationSuggestion> {
    events.iter().filter_map(duration_suggestion).collect()
}

fn timing_suggestion(
    event: &TimedEvent<'_>,
    occupied: &BTreeSet<(NaiveDate, u32)>,
) -> Option<OptimizationSuggestion> {
    let hours = optimal_hours(event.item.category);
    let current = schedule_utils::hour_of(event.start);
    let distance = |hour: u32| hour.abs_diff(current);

    if hours.is_empty() || hours.iter().any(|hour| distance(*hour) <= MAX_HOUR_DISTANCE) {
        return None;
    }

    let mut candidates = hours.to_vec();
    candidates.sort_by_key(|hour| (distance(*hour), *hour));
    let day = event.start.date_naive();
    let target = candidates
        .iter()
        .copied()
        .find(|hour| !occupied.contains(&(day, *hour)))
        .unwrap_or(candidates[0]);

    let suggested = schedule_utils::at_hour(event.start, target);
    debug!(
        target: "app::optimizer::timing",
        item_id = %event.id(),
        current,
        target,
        "better start hour available"
    );

    Some(
        OptimizationSuggestion::new(
            SuggestionType::BetterTiming,
            "hour",
            vec![event.id().to_string()],
            format!("Better time for \"{}\"", event.item.title),
            format!(
                "{} items tend to go best around {}; this one starts at {}.",
                capitalize(event.item.category.as_str()),
                format_hours(hours),
                schedule_utils::format_clock(event.start)
            ),
            ImpactLevel::Low,
            TIMING_CONFIDENCE,
        )
        .with_action(
            format!("Move to {target:02}:00"),
            format!("{target:02}:00 is free and suits this kind of item"),
            "Better focus and fewer reschedules",
        )
        .with_alternative(AlternativeTime {
            event_id: event.id().to_string(),
            original_time: schedule_utils::format_datetime(event.start),
            suggested_time: schedule_utils::format_datetime(suggested),
            reasoning: format!("Nearest open preferred hour is {target:02}:00"),
            confidence: TIMING_CONFIDENCE,
        }),
    )
}

fn duration_suggestion(event: &TimedEvent<'_>) -> Option<OptimizationSuggestion> {
    let expected = expected_duration(&event.item.title, event.item.category)?;
    let actual = event.duration_minutes();
    if (actual - expected).abs() <= DURATION_TOLERANCE_MINUTES {
        return None;
    }

    let suggested_end = schedule_utils::shift_minutes(event.start, expected);
    let verb = if actual > expected { "Shorten" } else { "Extend" };

    Some(
        OptimizationSuggestion::new(
            SuggestionType::DurationOptimization,
            "duration",
            vec![event.id().to_string()],
            format!("{verb} \"{}\" to {expected} minutes", event.item.title),
            format!(
                "\"{}\" is planned for {actual} minutes; similar items usually take about {expected}.",
                event.item.title
            ),
            ImpactLevel::Low,
            DURATION_CONFIDENCE,
        )
        .with_action(
            format!("End at {}", schedule_utils::format_clock(suggested_end)),
            format!("Typical length is {expected} minutes"),
            if actual > expected {
                format!("Frees {} minutes", actual - expected)
            } else {
                "Avoids running over".to_string()
            },
        )
        .with_alternative(AlternativeTime {
            event_id: event.id().to_string(),
            original_time: schedule_utils::format_datetime(event.end),
            suggested_time: schedule_utils::format_datetime(suggested_end),
            reasoning: format!("Planned end for a {expected}-minute slot"),
            confidence: DURATION_CONFIDENCE,
        }),
    )
}

fn format_hours(hours: &[u32]) -> String {
    hours
        .iter()
        .map(|hour| format!("{hour:02}:00"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
