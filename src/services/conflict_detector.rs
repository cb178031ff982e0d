use tracing::debug;

use crate::models::optimization::{
    AlternativeTime, ImpactLevel, OptimizationSuggestion, SuggestionType,
};
use crate::services::event_normalizer::TimedEvent;
use crate::services::schedule_utils;

const CONFLICT_CONFIDENCE: f64 = 0.95;
const SHIFT_CONFIDENCE: f64 = 0.8;
const HIGH_IMPACT_OVERLAP_MINUTES: i64 = 30;
const SHIFT_MINUTES: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictRecord {
    pub first_id: String,
    pub second_id: String,
    pub overlap_minutes: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ConflictReport {
    pub conflicts: Vec<ConflictRecord>,
    pub suggestions: Vec<OptimizationSuggestion>,
}

/// Pairwise overlap check over events sorted by start.
///
/// Worst case is O(n²) comparisons (every item overlapping every other). The
/// inner scan stops at the first later item that starts at or after the
/// current item's end, since no item after it can overlap either. Callers
/// with very large collections should pre-filter to the visible date range.
pub fn detect_conflicts(events: &[TimedEvent<'_>]) -> ConflictReport {
    let mut report = ConflictReport::default();

    for (idx, earlier) in events.iter().enumerate() {
        for later in &events[idx + 1..] {
            if later.start >= earlier.end {
                break;
            }
            let Some(overlap) =
                schedule_utils::overlap_minutes(earlier.start, earlier.end, later.start, later.end)
            else {
                continue;
            };

            debug!(
                target: "app::optimizer::conflicts",
                first = %earlier.id(),
                second = %later.id(),
                overlap,
                "time conflict detected"
            );

            report.conflicts.push(ConflictRecord {
                first_id: earlier.id().to_string(),
                second_id: later.id().to_string(),
                overlap_minutes: overlap,
            });
            report.suggestions.push(build_suggestion(earlier, later, overlap));
        }
    }

    report
}

fn build_suggestion(
    earlier: &TimedEvent<'_>,
    later: &TimedEvent<'_>,
    overlap: i64,
) -> OptimizationSuggestion {
    let impact = if overlap > HIGH_IMPACT_OVERLAP_MINUTES {
        ImpactLevel::High
    } else {
        ImpactLevel::Medium
    };

    OptimizationSuggestion::new(
        SuggestionType::TimeConflict,
        "overlap",
        vec![earlier.id().to_string(), later.id().to_string()],
        format!(
            "\"{}\" overlaps \"{}\"",
            earlier.item.title, later.item.title
        ),
        format!(
            "\"{}\" and \"{}\" overlap by {} minutes starting at {}.",
            earlier.item.title,
            later.item.title,
            overlap,
            schedule_utils::format_clock(later.start)
        ),
        impact,
        CONFLICT_CONFIDENCE,
    )
    .with_action(
        format!("Move \"{}\" one hour earlier", earlier.item.title),
        "Frees the overlapping window without touching the later commitment",
        format!("Removes a {overlap}-minute double booking"),
    )
    .with_action(
        format!("Move \"{}\" one hour later", later.item.title),
        "Keeps the earlier commitment in place",
        format!("Removes a {overlap}-minute double booking"),
    )
    .with_alternative(AlternativeTime {
        event_id: earlier.id().to_string(),
        original_time: schedule_utils::format_datetime(earlier.start),
        suggested_time: schedule_utils::format_datetime(schedule_utils::shift_minutes(
            earlier.start,
            -SHIFT_MINUTES,
        )),
        reasoning: format!("Start \"{}\" one hour earlier", earlier.item.title),
        confidence: SHIFT_CONFIDENCE,
    })
    .with_alternative(AlternativeTime {
        event_id: later.id().to_string(),
        original_time: schedule_utils::format_datetime(later.start),
        suggested_time: schedule_utils::format_datetime(schedule_utils::shift_minutes(
            later.start,
            SHIFT_MINUTES,
        )),
        reasoning: format!("Start \"{}\" one hour later", later.item.title),
        confidence: SHIFT_CONFIDENCE,
    })
}
