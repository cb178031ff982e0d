use tracing::debug;

use crate::models::optimization::{
    AlternativeTime, ImpactLevel, OptimizationSuggestion, SuggestionType,
};
use crate::models::preferences::OptimizerPreferences;
use crate::services::event_normalizer::TimedEvent;
use crate::services::schedule_utils;

const TRAVEL_CONFIDENCE: f64 = 0.75;
const RESCHEDULE_CONFIDENCE: f64 = 0.7;

const HOME_OFFICE_MINUTES: i64 = 30;
const COURT_MINUTES: i64 = 45;
const HOSPITAL_MINUTES: i64 = 25;
const DEFAULT_TRAVEL_MINUTES: i64 = 20;

/// Estimates door-to-door travel between two free-text locations.
pub trait TravelEstimator: Send + Sync {
    fn estimate_minutes(&self, from: &str, to: &str) -> i64;
}

/// Keyword table used when no routing service is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTravelEstimator;

impl TravelEstimator for HeuristicTravelEstimator {
    fn estimate_minutes(&self, from: &str, to: &str) -> i64 {
        let from = from.trim().to_lowercase();
        let to = to.trim().to_lowercase();
        let either = |needle: &str| from.contains(needle) || to.contains(needle);

        if from == to {
            0
        } else if either("court") {
            COURT_MINUTES
        } else if either("hospital") {
            HOSPITAL_MINUTES
        } else if (from.contains("home") && to.contains("office"))
            || (from.contains("office") && to.contains("home"))
        {
            HOME_OFFICE_MINUTES
        } else {
            DEFAULT_TRAVEL_MINUTES
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelLeg {
    pub from_id: String,
    pub to_id: String,
    pub travel_minutes: i64,
    pub gap_minutes: i64,
}

#[derive(Debug, Clone, Default)]
pub struct TravelReport {
    /// Estimated minutes over every located adjacent pair, flagged or not.
    pub total_travel_minutes: i64,
    pub legs: Vec<TravelLeg>,
    pub suggestions: Vec<OptimizationSuggestion>,
}

pub fn analyze_travel(
    events: &[TimedEvent<'_>],
    estimator: &dyn TravelEstimator,
    preferences: &OptimizerPreferences,
) -> TravelReport {
    let buffer = preferences.travel_buffer_minutes.max(0);
    let mut report = TravelReport::default();

    for pair in events.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        let (Some(from_location), Some(to_location)) =
            (from.item.location_label(), to.item.location_label())
        else {
            continue;
        };

        let travel = estimator.estimate_minutes(from_location, to_location).max(0);
        let gap = schedule_utils::minutes_between(from.end, to.start);
        report.total_travel_minutes = report.total_travel_minutes.saturating_add(travel);
        report.legs.push(TravelLeg {
            from_id: from.id().to_string(),
            to_id: to.id().to_string(),
            travel_minutes: travel,
            gap_minutes: gap,
        });

        if travel == 0 || gap >= travel.saturating_add(buffer) {
            continue;
        }

        debug!(
            target: "app::optimizer::travel",
            from = %from.id(),
            to = %to.id(),
            travel,
            gap,
            "insufficient travel time"
        );
        report.suggestions.push(build_suggestion(
            from,
            to,
            from_location,
            to_location,
            travel,
            gap,
            buffer,
        ));
    }

    report
}

fn build_suggestion(
    from: &TimedEvent<'_>,
    to: &TimedEvent<'_>,
    from_location: &str,
    to_location: &str,
    travel: i64,
    gap: i64,
    buffer: i64,
) -> OptimizationSuggestion {
    let impact = if gap < travel {
        ImpactLevel::High
    } else {
        ImpactLevel::Medium
    };
    let needed = travel.saturating_add(buffer);
    let suggested_start = schedule_utils::shift_minutes(from.end, needed);

    OptimizationSuggestion::new(
        SuggestionType::TravelTime,
        "leg",
        vec![from.id().to_string(), to.id().to_string()],
        format!("Not enough time to reach {to_location}"),
        format!(
            "Getting from {from_location} to {to_location} takes about {travel} minutes, \
             but only {gap} minutes separate \"{}\" and \"{}\".",
            from.item.title, to.item.title
        ),
        impact,
        TRAVEL_CONFIDENCE,
    )
    .with_action(
        format!(
            "Start \"{}\" at {}",
            to.item.title,
            schedule_utils::format_clock(suggested_start)
        ),
        format!("Covers {travel} minutes of travel plus a {buffer}-minute buffer"),
        "Arrive on time without rushing",
    )
    .with_alternative(AlternativeTime {
        event_id: to.id().to_string(),
        original_time: schedule_utils::format_datetime(to.start),
        suggested_time: schedule_utils::format_datetime(suggested_start),
        reasoning: format!("Leaves {needed} minutes after \"{}\" ends", from.item.title),
        confidence: RESCHEDULE_CONFIDENCE,
    })
}
