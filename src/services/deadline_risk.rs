use tracing::debug;

use crate::models::optimization::{
    AlternativeTime, ImpactLevel, OptimizationSuggestion, SuggestionType,
};
use crate::services::event_normalizer::TimedEvent;
use crate::services::schedule_utils;

const URGENT_CLUSTER_THRESHOLD: usize = 2;
const CRITICAL_CLUSTER_SIZE: usize = 4;
const CLUSTER_CONFIDENCE: f64 = 0.9;
const CLUSTER_ALTERNATIVE_CONFIDENCE: f64 = 0.6;
const SPREAD_START_HOUR: u32 = 9;
const SPREAD_INTERVAL_MINUTES: i64 = 120;

const MIN_URGENT_GAP_MINUTES: i64 = 60;
const PAIR_CONFIDENCE: f64 = 0.85;
const PAIR_ALTERNATIVE_CONFIDENCE: f64 = 0.75;
const PAIR_SHIFT_MINUTES: i64 = 120;

const RISK_PER_URGENT_ITEM: u32 = 20;
const MAX_URGENT_COUNT_RISK: u32 = 60;
const RISK_PER_CLOSE_PAIR: u32 = 30;
const MAX_RISK: u32 = 100;

#[derive(Debug, Clone, Default)]
pub struct DeadlineReport {
    pub urgent_count: usize,
    pub close_pairs: usize,
    pub deadline_risk: u32,
    pub suggestions: Vec<OptimizationSuggestion>,
}

/// Both checks look at Urgent items only; `events` must be sorted by start.
/// All-day items count toward the cluster but have no clock gap to another
/// item, so the back-to-back check skips them.
pub fn assess_deadline_risk(events: &[TimedEvent<'_>]) -> DeadlineReport {
    let urgent: Vec<&TimedEvent<'_>> = events.iter().filter(|event| event.item.is_urgent()).collect();
    let mut suggestions = Vec::new();

    if urgent.len() > URGENT_CLUSTER_THRESHOLD {
        suggestions.push(build_cluster_suggestion(&urgent));
    }

    let mut close_pairs = 0usize;
    let timed_urgent: Vec<&TimedEvent<'_>> = urgent
        .iter()
        .copied()
        .filter(|event| !event.item.all_day)
        .collect();
    for pair in timed_urgent.windows(2) {
        let (earlier, later) = (pair[0], pair[1]);
        let gap = schedule_utils::minutes_between(earlier.end, later.start);
        if gap < MIN_URGENT_GAP_MINUTES {
            close_pairs += 1;
            suggestions.push(build_pair_suggestion(earlier, later, gap));
        }
    }

    let count_risk =
        (urgent.len() as u32).saturating_mul(RISK_PER_URGENT_ITEM).min(MAX_URGENT_COUNT_RISK);
    let pair_risk = (close_pairs as u32).saturating_mul(RISK_PER_CLOSE_PAIR);
    let deadline_risk = count_risk.saturating_add(pair_risk).min(MAX_RISK);

    debug!(
        target: "app::optimizer::deadline",
        urgent = urgent.len(),
        close_pairs,
        deadline_risk,
        "deadline risk assessed"
    );

    DeadlineReport {
        urgent_count: urgent.len(),
        close_pairs,
        deadline_risk,
        suggestions,
    }
}

fn build_cluster_suggestion(urgent: &[&TimedEvent<'_>]) -> OptimizationSuggestion {
    let impact = if urgent.len() > CRITICAL_CLUSTER_SIZE {
        ImpactLevel::Critical
    } else {
        ImpactLevel::High
    };
    let anchor = schedule_utils::at_hour(urgent[0].start, SPREAD_START_HOUR);

    let alternatives = urgent.iter().enumerate().map(|(idx, event)| {
        let suggested = schedule_utils::shift_minutes(anchor, idx as i64 * SPREAD_INTERVAL_MINUTES);
        AlternativeTime {
            event_id: event.id().to_string(),
            original_time: schedule_utils::format_datetime(event.start),
            suggested_time: schedule_utils::format_datetime(suggested),
            reasoning: format!(
                "Give \"{}\" its own two-hour slot",
                event.item.title
            ),
            confidence: CLUSTER_ALTERNATIVE_CONFIDENCE,
        }
    });

    OptimizationSuggestion::new(
        SuggestionType::DeadlineRisk,
        "cluster",
        urgent.iter().map(|event| event.id().to_string()).collect(),
        format!("{} urgent items compete for attention", urgent.len()),
        format!(
            "{} items are marked urgent; handling them together raises the chance one slips.",
            urgent.len()
        ),
        impact,
        CLUSTER_CONFIDENCE,
    )
    .with_action(
        "Spread urgent items two hours apart",
        "Each urgent item gets undivided time",
        "Lower chance of missing a deadline",
    )
    .with_action(
        "Downgrade items that are not truly urgent",
        "Fewer urgent items keeps real priorities visible",
        "Clearer focus",
    )
    .with_alternatives(alternatives)
}

fn build_pair_suggestion(
    earlier: &TimedEvent<'_>,
    later: &TimedEvent<'_>,
    gap: i64,
) -> OptimizationSuggestion {
    let suggested = schedule_utils::shift_minutes(later.start, PAIR_SHIFT_MINUTES);
    let spacing = if gap < 0 {
        format!("Two urgent items overlap by {} minutes", gap.unsigned_abs())
    } else {
        format!("Only {gap} minutes separate two urgent items")
    };

    OptimizationSuggestion::new(
        SuggestionType::DeadlineRisk,
        "pair",
        vec![earlier.id().to_string(), later.id().to_string()],
        format!(
            "Urgent items \"{}\" and \"{}\" are back to back",
            earlier.item.title, later.item.title
        ),
        format!(
            "{spacing}; an overrun on the first puts the second at risk."
        ),
        ImpactLevel::High,
        PAIR_CONFIDENCE,
    )
    .with_action(
        format!("Move \"{}\" two hours later", later.item.title),
        "Leaves room for the first urgent item to overrun",
        "Protects the second deadline",
    )
    .with_alternative(AlternativeTime {
        event_id: later.id().to_string(),
        original_time: schedule_utils::format_datetime(later.start),
        suggested_time: schedule_utils::format_datetime(suggested),
        reasoning: "Two-hour cushion after the previous urgent item".to_string(),
        confidence: PAIR_ALTERNATIVE_CONFIDENCE,
    })
}
