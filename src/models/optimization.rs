use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::fingerprint::suggestion_fingerprint;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    TimeConflict,
    TravelTime,
    EnergyOptimization,
    DeadlineRisk,
    BetterTiming,
    DurationOptimization,
    InvalidItem,
}

impl SuggestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionType::TimeConflict => "time_conflict",
            SuggestionType::TravelTime => "travel_time",
            SuggestionType::EnergyOptimization => "energy_optimization",
            SuggestionType::DeadlineRisk => "deadline_risk",
            SuggestionType::BetterTiming => "better_timing",
            SuggestionType::DurationOptimization => "duration_optimization",
            SuggestionType::InvalidItem => "invalid_item",
        }
    }
}

impl fmt::Display for SuggestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered so that `Critical` compares greatest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ImpactLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::Low => "low",
            ImpactLevel::Medium => "medium",
            ImpactLevel::High => "high",
            ImpactLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedAction {
    pub action: String,
    pub reasoning: String,
    pub estimated_benefit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeTime {
    pub event_id: String,
    pub original_time: String,
    pub suggested_time: String,
    pub reasoning: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSuggestion {
    pub id: String,
    #[serde(rename = "type")]
    pub suggestion_type: SuggestionType,
    pub title: String,
    pub description: String,
    pub impact: ImpactLevel,
    pub confidence: f64,
    pub affected_events: Vec<String>,
    #[serde(default)]
    pub suggested_actions: Vec<SuggestedAction>,
    #[serde(default)]
    pub alternative_times: Vec<AlternativeTime>,
}

impl OptimizationSuggestion {
    /// Builds a suggestion whose id is derived from its type, a discriminator
    /// and the affected item ids, so identical input yields identical ids.
    pub fn new(
        suggestion_type: SuggestionType,
        discriminator: &str,
        affected_events: Vec<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        impact: ImpactLevel,
        confidence: f64,
    ) -> Self {
        let id = format!(
            "{}-{}",
            suggestion_type.as_str(),
            suggestion_fingerprint(suggestion_type.as_str(), discriminator, &affected_events)
        );
        Self {
            id,
            suggestion_type,
            title: title.into(),
            description: description.into(),
            impact,
            confidence: confidence.clamp(0.0, 1.0),
            affected_events,
            suggested_actions: Vec::new(),
            alternative_times: Vec::new(),
        }
    }

    pub fn with_action(
        mut self,
        action: impl Into<String>,
        reasoning: impl Into<String>,
        estimated_benefit: impl Into<String>,
    ) -> Self {
        self.suggested_actions.push(SuggestedAction {
            action: action.into(),
            reasoning: reasoning.into(),
            estimated_benefit: estimated_benefit.into(),
        });
        self
    }

    pub fn with_alternative(mut self, alternative: AlternativeTime) -> Self {
        self.alternative_times.push(alternative);
        self
    }

    pub fn with_alternatives(mut self, alternatives: impl IntoIterator<Item = AlternativeTime>) -> Self {
        self.alternative_times.extend(alternatives);
        self
    }
}

/// Coarse hint for a notification collaborator deciding whether to escalate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EscalationLevel {
    None,
    Advisory,
    Urgent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAnalysis {
    pub total_events: usize,
    pub conflicts: usize,
    pub travel_time: i64,
    pub energy_score: u32,
    pub deadline_risk: u32,
    pub optimizations: Vec<OptimizationSuggestion>,
    pub overall_score: u32,
    pub recommendations: Vec<String>,
}

impl ScheduleAnalysis {
    pub fn count_by_impact(&self, impact: ImpactLevel) -> usize {
        self.optimizations
            .iter()
            .filter(|suggestion| suggestion.impact == impact)
            .count()
    }

    pub fn suggestions_of_type(
        &self,
        suggestion_type: SuggestionType,
    ) -> impl Iterator<Item = &OptimizationSuggestion> {
        self.optimizations
            .iter()
            .filter(move |suggestion| suggestion.suggestion_type == suggestion_type)
    }

    pub fn escalation_level(&self) -> EscalationLevel {
        if self.conflicts > 0 || self.overall_score < 50 {
            EscalationLevel::Urgent
        } else if self.count_by_impact(ImpactLevel::Critical) > 0
            || self.count_by_impact(ImpactLevel::High) > 0
            || self.overall_score < 85
        {
            EscalationLevel::Advisory
        } else {
            EscalationLevel::None
        }
    }
}
