use std::cmp::Ordering;
use std::sync::Arc;

use tracing::info;

use crate::error::AppResult;
use crate::models::optimization::{ImpactLevel, OptimizationSuggestion, ScheduleAnalysis};
use crate::models::preferences::OptimizerPreferences;
use crate::models::schedule::ScheduledItem;
use crate::services::conflict_detector::detect_conflicts;
use crate::services::deadline_risk::assess_deadline_risk;
use crate::services::energy_scorer::score_energy;
use crate::services::event_normalizer::normalize_events;
use crate::services::timing_advisor::{advise_duration, advise_timing};
use crate::services::travel_analyzer::{analyze_travel, HeuristicTravelEstimator, TravelEstimator};

const MAX_SCORE: f64 = 100.0;
const CONFLICT_PENALTY: f64 = 15.0;
const TRAVEL_HEAVY_MINUTES: i64 = 120;
const TRAVEL_HEAVY_PENALTY: f64 = 20.0;
const ENERGY_WEIGHT: f64 = 0.3;
const RISK_WEIGHT: f64 = 0.2;
const SUGGESTION_PENALTY: f64 = 2.0;

/// Stateless analysis engine. Holds only read-only configuration, so one
/// instance can be shared across threads.
pub struct ScheduleOptimizer {
    preferences: OptimizerPreferences,
    travel_estimator: Arc<dyn TravelEstimator>,
}

impl Default for ScheduleOptimizer {
    fn default() -> Self {
        Self {
            preferences: OptimizerPreferences::default(),
            travel_estimator: Arc::new(HeuristicTravelEstimator),
        }
    }
}

impl ScheduleOptimizer {
    pub fn new(preferences: OptimizerPreferences) -> AppResult<Self> {
        preferences.validate()?;
        Ok(Self {
            preferences,
            travel_estimator: Arc::new(HeuristicTravelEstimator),
        })
    }

    pub fn with_travel_estimator(mut self, estimator: Arc<dyn TravelEstimator>) -> Self {
        self.travel_estimator = estimator;
        self
    }

    pub fn preferences(&self) -> &OptimizerPreferences {
        &self.preferences
    }

    pub fn analyze(&self, items: &[ScheduledItem]) -> ScheduleAnalysis {
        self.analyze_with_preferences(items, &self.preferences)
    }

    /// Runs every analyzer over one normalized snapshot and folds their
    /// findings into a single ranked result. Never fails: malformed items are
    /// reported as `invalid_item` suggestions.
    pub fn analyze_with_preferences(
        &self,
        items: &[ScheduledItem],
        preferences: &OptimizerPreferences,
    ) -> ScheduleAnalysis {
        let normalized = normalize_events(items);
        let timed = normalized.timed();

        let conflict_report = detect_conflicts(&timed);
        let travel_report = analyze_travel(&timed, self.travel_estimator.as_ref(), preferences);
        let energy_report = score_energy(&timed, preferences);
        let deadline_report = assess_deadline_risk(&normalized.events);

        let mut optimizations: Vec<OptimizationSuggestion> = normalized
            .rejected
            .iter()
            .map(|rejected| rejected.to_suggestion())
            .collect();
        optimizations.extend(conflict_report.suggestions);
        optimizations.extend(travel_report.suggestions);
        optimizations.extend(energy_report.suggestions);
        optimizations.extend(deadline_report.suggestions);
        optimizations.extend(advise_timing(&timed));
        optimizations.extend(advise_duration(&timed));
        rank_suggestions(&mut optimizations);

        let conflicts = conflict_report.conflicts.len();
        let overall_score = compute_overall_score(
            conflicts,
            travel_report.total_travel_minutes,
            energy_report.energy_score,
            deadline_report.deadline_risk,
            optimizations.len(),
        );

        let critical = count_impact(&optimizations, ImpactLevel::Critical);
        let high = count_impact(&optimizations, ImpactLevel::High);
        let recommendations = build_recommendations(overall_score, critical, high, conflicts);

        info!(
            target: "app::optimizer",
            total = items.len(),
            excluded = normalized.rejected.len(),
            conflicts,
            travel_minutes = travel_report.total_travel_minutes,
            energy = energy_report.energy_score,
            deadline_risk = deadline_report.deadline_risk,
            suggestions = optimizations.len(),
            overall_score,
            "schedule analyzed"
        );

        ScheduleAnalysis {
            total_events: items.len(),
            conflicts,
            travel_time: travel_report.total_travel_minutes,
            energy_score: energy_report.energy_score,
            deadline_risk: deadline_report.deadline_risk,
            optimizations,
            overall_score,
            recommendations,
        }
    }
}

/// One-shot analysis with the default travel heuristic.
pub fn analyze_schedule(
    items: &[ScheduledItem],
    preferences: Option<&OptimizerPreferences>,
) -> ScheduleAnalysis {
    let optimizer = ScheduleOptimizer::default();
    match preferences {
        Some(preferences) => optimizer.analyze_with_preferences(items, preferences),
        None => optimizer.analyze(items),
    }
}

/// Impact descending, then confidence descending; ties keep analyzer order.
pub fn rank_suggestions(suggestions: &mut [OptimizationSuggestion]) {
    suggestions.sort_by(|a, b| {
        b.impact.cmp(&a.impact).then_with(|| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        })
    });
}

pub fn compute_overall_score(
    conflicts: usize,
    travel_minutes: i64,
    energy_score: u32,
    deadline_risk: u32,
    suggestion_count: usize,
) -> u32 {
    let mut score = MAX_SCORE;
    score -= CONFLICT_PENALTY * conflicts as f64;
    if travel_minutes > TRAVEL_HEAVY_MINUTES {
        score -= TRAVEL_HEAVY_PENALTY;
    }
    score -= ENERGY_WEIGHT * (MAX_SCORE - f64::from(energy_score.min(100)));
    score -= RISK_WEIGHT * f64::from(deadline_risk.min(100));
    score -= SUGGESTION_PENALTY * suggestion_count as f64;

    score.clamp(0.0, MAX_SCORE).round() as u32
}

pub fn build_recommendations(
    overall_score: u32,
    critical: usize,
    high: usize,
    conflicts: usize,
) -> Vec<String> {
    let headline = match overall_score {
        0..=49 => "Schedule needs significant optimization",
        50..=69 => "Schedule is workable; consider adjustments",
        70..=84 => "Schedule is good with minor improvements",
        _ => "Schedule looks excellent",
    };

    let mut recommendations = vec![headline.to_string()];
    if critical > 0 {
        recommendations.push(format!(
            "{critical} critical issue(s) need immediate attention"
        ));
    }
    if high > 0 {
        recommendations.push(format!("{high} high-impact issue(s) should be addressed soon"));
    }
    if conflicts > 0 {
        recommendations.push(format!("Resolve {conflicts} time conflict(s)"));
    }
    recommendations
}

fn count_impact(suggestions: &[OptimizationSuggestion], impact: ImpactLevel) -> usize {
    suggestions
        .iter()
        .filter(|suggestion| suggestion.impact == impact)
        .count()
}
