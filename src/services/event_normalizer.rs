use std::fmt;

use chrono::{DateTime, FixedOffset};
use tracing::warn;

use crate::models::optimization::{ImpactLevel, OptimizationSuggestion, SuggestionType};
use crate::models::schedule::ScheduledItem;
use crate::services::schedule_utils;

const INVALID_ITEM_CONFIDENCE: f64 = 0.3;

/// A scheduled item whose instants parsed cleanly, borrowed from the caller's
/// collection.
#[derive(Debug, Clone, Copy)]
pub struct TimedEvent<'a> {
    pub item: &'a ScheduledItem,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl<'a> TimedEvent<'a> {
    pub fn id(&self) -> &'a str {
        &self.item.id
    }

    pub fn duration_minutes(&self) -> i64 {
        schedule_utils::minutes_between(self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    MissingStart,
    MissingEnd,
    UnparsableStart,
    UnparsableEnd,
    InvertedInterval,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::MissingStart => "missing start time",
            RejectionReason::MissingEnd => "missing end time",
            RejectionReason::UnparsableStart => "unparsable start time",
            RejectionReason::UnparsableEnd => "unparsable end time",
            RejectionReason::InvertedInterval => "end time precedes start time",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RejectedItem<'a> {
    pub item: &'a ScheduledItem,
    pub reason: RejectionReason,
}

impl RejectedItem<'_> {
    pub fn to_suggestion(&self) -> OptimizationSuggestion {
        let title = if self.item.title.trim().is_empty() {
            self.item.id.as_str()
        } else {
            self.item.title.as_str()
        };
        OptimizationSuggestion::new(
            SuggestionType::InvalidItem,
            self.reason.as_str(),
            vec![self.item.id.clone()],
            format!("Check the time of \"{title}\""),
            format!(
                "\"{title}\" was left out of the analysis: {}.",
                self.reason
            ),
            ImpactLevel::Low,
            INVALID_ITEM_CONFIDENCE,
        )
        .with_action(
            "Fix the start and end time",
            "Items without a valid time window cannot be checked for conflicts",
            "Complete analysis coverage",
        )
    }
}

/// Valid items in ascending start order plus the items that could not be
/// placed on the timeline.
#[derive(Debug, Clone, Default)]
pub struct NormalizedSchedule<'a> {
    pub events: Vec<TimedEvent<'a>>,
    pub rejected: Vec<RejectedItem<'a>>,
}

impl<'a> NormalizedSchedule<'a> {
    /// Valid items that occupy a concrete time window (all-day items excluded).
    pub fn timed(&self) -> Vec<TimedEvent<'a>> {
        self.events
            .iter()
            .filter(|event| !event.item.all_day)
            .copied()
            .collect()
    }
}

/// Sort items by start instant without touching the input. The sort is
/// stable, so items sharing a start keep their input order.
pub fn normalize_events(items: &[ScheduledItem]) -> NormalizedSchedule<'_> {
    let mut normalized = NormalizedSchedule::default();

    for item in items {
        match parse_window(item) {
            Ok((start, end)) => normalized.events.push(TimedEvent { item, start, end }),
            Err(reason) => {
                warn!(
                    target: "app::optimizer::normalizer",
                    item_id = %item.id,
                    %reason,
                    "excluding malformed item from analysis"
                );
                normalized.rejected.push(RejectedItem { item, reason });
            }
        }
    }

    normalized.events.sort_by_key(|event| event.start);
    normalized
}

fn parse_window(
    item: &ScheduledItem,
) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>), RejectionReason> {
    if item.start_at.trim().is_empty() {
        return Err(RejectionReason::MissingStart);
    }
    if item.end_at.trim().is_empty() {
        return Err(RejectionReason::MissingEnd);
    }
    let start = schedule_utils::parse_datetime(&item.start_at)
        .map_err(|_| RejectionReason::UnparsableStart)?;
    let end =
        schedule_utils::parse_datetime(&item.end_at).map_err(|_| RejectionReason::UnparsableEnd)?;
    if end < start {
        return Err(RejectionReason::InvertedInterval);
    }
    Ok((start, end))
}
