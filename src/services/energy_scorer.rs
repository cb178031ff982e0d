use std::ops::Range;

use tracing::debug;

use crate::models::optimization::{
    AlternativeTime, ImpactLevel, OptimizationSuggestion, SuggestionType,
};
use crate::models::preferences::{OptimizerPreferences, TimeOfDay};
use crate::services::event_normalizer::TimedEvent;
use crate::services::schedule_utils;

const MAX_ENERGY: f64 = 100.0;
const OFF_HOURS_PENALTY: f64 = 10.0;
const RUN_PENALTY_WEIGHT: f64 = 2.0;
const HIGH_IMPACT_RUN_LENGTH: usize = 5;
const ENERGY_CONFIDENCE: f64 = 0.8;
const BREAK_CONFIDENCE: f64 = 0.7;

#[derive(Debug, Clone, Default)]
pub struct EnergyReport {
    pub energy_score: u32,
    /// Index ranges (into the analyzed slice) of runs longer than allowed.
    pub draining_runs: Vec<Range<usize>>,
    pub suggestions: Vec<OptimizationSuggestion>,
}

/// Accumulator for the run-length fold. Each step returns a fresh value.
#[derive(Debug, Clone)]
struct RunFold {
    run_start: usize,
    run_len: usize,
    penalty: f64,
    draining_runs: Vec<Range<usize>>,
}

impl RunFold {
    fn close_run(mut self, end: usize, max_consecutive: usize) -> Self {
        if self.run_len > max_consecutive {
            self.draining_runs.push(self.run_start..end);
        }
        self
    }
}

pub fn score_energy(events: &[TimedEvent<'_>], preferences: &OptimizerPreferences) -> EnergyReport {
    if events.is_empty() {
        return EnergyReport {
            energy_score: MAX_ENERGY as u32,
            ..EnergyReport::default()
        };
    }

    let break_minutes = preferences.preferred_break_minutes.max(0);
    let max_consecutive = preferences.max_consecutive_events.max(1);

    let initial = RunFold {
        run_start: 0,
        run_len: 1,
        penalty: 0.0,
        draining_runs: Vec::new(),
    };

    let folded = events
        .windows(2)
        .enumerate()
        .fold(initial, |acc, (idx, pair)| {
            let next_idx = idx + 1;
            let gap = schedule_utils::minutes_between(pair[0].end, pair[1].start);
            if gap > break_minutes {
                let closed = acc.close_run(next_idx, max_consecutive);
                return RunFold {
                    run_start: next_idx,
                    run_len: 1,
                    ..closed
                };
            }

            let run_len = acc.run_len + 1;
            let penalty = if run_len > max_consecutive {
                let time_of_day = TimeOfDay::from_hour(schedule_utils::hour_of(pair[1].start));
                let multiplier = preferences.energy_levels.multiplier_for(time_of_day);
                acc.penalty + RUN_PENALTY_WEIGHT * run_len as f64 / multiplier.max(0.1)
            } else {
                acc.penalty
            };
            RunFold {
                run_len,
                penalty,
                ..acc
            }
        })
        .close_run(events.len(), max_consecutive);

    let off_hours_penalty = events
        .iter()
        .filter(|event| {
            !preferences
                .work_hours
                .contains_hour(schedule_utils::hour_of(event.start))
        })
        .count() as f64
        * OFF_HOURS_PENALTY;

    let energy = (MAX_ENERGY - folded.penalty - off_hours_penalty).clamp(0.0, MAX_ENERGY);

    let suggestions = folded
        .draining_runs
        .iter()
        .map(|run| build_suggestion(&events[run.clone()], break_minutes))
        .collect();

    debug!(
        target: "app::optimizer::energy",
        energy,
        run_penalty = folded.penalty,
        off_hours_penalty,
        draining_runs = folded.draining_runs.len(),
        "energy scored"
    );

    EnergyReport {
        energy_score: energy.round() as u32,
        draining_runs: folded.draining_runs,
        suggestions,
    }
}

fn build_suggestion(run: &[TimedEvent<'_>], break_minutes: i64) -> OptimizationSuggestion {
    let impact = if run.len() >= HIGH_IMPACT_RUN_LENGTH {
        ImpactLevel::High
    } else {
        ImpactLevel::Medium
    };
    let affected = run.iter().map(|event| event.id().to_string()).collect();
    let (first, last) = (&run[0], &run[run.len() - 1]);

    // Shifts accumulate: each start follows the previous item's moved end.
    let alternatives = run.windows(2).scan(first.end, |previous_end, pair| {
        let suggested = schedule_utils::shift_minutes(*previous_end, break_minutes);
        *previous_end = schedule_utils::shift_minutes(suggested, pair[1].duration_minutes());
        Some(AlternativeTime {
            event_id: pair[1].id().to_string(),
            original_time: schedule_utils::format_datetime(pair[1].start),
            suggested_time: schedule_utils::format_datetime(suggested),
            reasoning: format!(
                "Leave {break_minutes} minutes after \"{}\"",
                pair[0].item.title
            ),
            confidence: BREAK_CONFIDENCE,
        })
    });

    OptimizationSuggestion::new(
        SuggestionType::EnergyOptimization,
        "run",
        affected,
        format!("{} back-to-back items without a break", run.len()),
        format!(
            "From {} to {} there is no gap of more than {break_minutes} minutes.",
            schedule_utils::format_clock(first.start),
            schedule_utils::format_clock(last.end)
        ),
        impact,
        ENERGY_CONFIDENCE,
    )
    .with_action(
        format!("Insert {break_minutes}-minute breaks"),
        "Long unbroken runs lower focus for the later items",
        "Steadier energy through the day",
    )
    .with_alternatives(alternatives)
}
