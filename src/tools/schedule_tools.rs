use crate::error::{AppError, AppResult};
use crate::models::optimization::{ImpactLevel, ScheduleAnalysis};
use crate::models::preferences::{PreferencesUpdate, MAX_PREFERENCE_MINUTES};
use crate::models::schedule::ScheduledItem;
use crate::services::schedule_optimizer::ScheduleOptimizer;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, warn};

/// Get the schema for the analyze_schedule tool
pub fn analyze_schedule_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "events": {
                "type": "array",
                "description": "Scheduled items to analyze (required)",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "title": { "type": "string" },
                        "startAt": {
                            "type": "string",
                            "description": "Start instant in RFC3339 format"
                        },
                        "endAt": {
                            "type": "string",
                            "description": "End instant in RFC3339 format"
                        },
                        "allDay": { "type": "boolean" },
                        "location": { "type": ["string", "null"] },
                        "category": {
                            "type": "string",
                            "description": "work, court, family, personal, recovery or other"
                        },
                        "priority": {
                            "type": "string",
                            "enum": ["low", "medium", "high", "urgent"]
                        }
                    },
                    "required": ["id", "title"]
                }
            },
            "preferences": {
                "type": "object",
                "description": "Optional per-call overrides of the optimizer preferences",
                "properties": {
                    "workHours": {
                        "type": "object",
                        "properties": {
                            "start": { "type": "integer", "minimum": 0, "maximum": 23 },
                            "end": { "type": "integer", "minimum": 0, "maximum": 23 }
                        },
                        "required": ["start", "end"]
                    },
                    "preferredBreakMinutes": {
                        "type": "integer",
                        "minimum": 0,
                        "maximum": MAX_PREFERENCE_MINUTES
                    },
                    "maxConsecutiveEvents": { "type": "integer", "minimum": 1 },
                    "travelBufferMinutes": {
                        "type": "integer",
                        "minimum": 0,
                        "maximum": MAX_PREFERENCE_MINUTES
                    },
                    "energyLevels": {
                        "type": "object",
                        "properties": {
                            "morning": { "type": "number" },
                            "afternoon": { "type": "number" },
                            "evening": { "type": "number" }
                        },
                        "required": ["morning", "afternoon", "evening"]
                    }
                }
            }
        },
        "required": ["events"]
    })
}

/// Parameters for analyzing a schedule
#[derive(Debug, Deserialize)]
struct AnalyzeScheduleParams {
    events: Vec<ScheduledItem>,
    #[serde(default)]
    preferences: Option<PreferencesUpdate>,
}

/// Validate raw arguments against the tool schema.
fn validate_args(args: &JsonValue) -> AppResult<()> {
    let schema_value = analyze_schedule_schema();
    let schema = jsonschema::JSONSchema::compile(&schema_value)
        .map_err(|err| AppError::other(format!("invalid analyze_schedule schema: {err}")))?;

    if let Err(validation_errors) = schema.validate(args) {
        let error_messages: Vec<String> = validation_errors
            .map(|e| {
                let path = e.instance_path.to_string();
                let path_display = if path.is_empty() {
                    "root".to_string()
                } else {
                    path
                };
                format!("  - {}: {}", path_display, e)
            })
            .collect();

        warn!(
            target: "app::tool",
            tool_name = "analyze_schedule",
            errors = error_messages.len(),
            "tool call validation failed"
        );

        return Err(AppError::validation_with_details(
            format!(
                "Parameter validation failed for tool 'analyze_schedule':\n{}",
                error_messages.join("\n")
            ),
            json!({
                "tool_name": "analyze_schedule",
                "errors": error_messages,
            }),
        ));
    }

    Ok(())
}

/// Helper function to extract parameters from JSON
fn extract_params<T: for<'de> Deserialize<'de>>(args: &JsonValue) -> AppResult<T> {
    serde_json::from_value(args.clone())
        .map_err(|e| AppError::validation(format!("Failed to parse tool parameters: {}", e)))
}

fn summarize(analysis: &ScheduleAnalysis) -> String {
    let mut summary = format!(
        "Analyzed {} item(s): overall score {}/100, {} conflict(s), {} suggestion(s).",
        analysis.total_events,
        analysis.overall_score,
        analysis.conflicts,
        analysis.optimizations.len()
    );

    for suggestion in analysis
        .optimizations
        .iter()
        .filter(|s| s.impact >= ImpactLevel::High)
    {
        summary.push_str(&format!("\n- [{}] {}", suggestion.impact, suggestion.title));
    }

    summary
}

/// Analyze a schedule supplied as JSON.
///
/// Returns `{ success, summary, escalation, analysis }`. Argument problems are
/// reported as validation errors; problems with individual items are reported
/// inside the analysis.
pub fn analyze_schedule_tool(optimizer: &ScheduleOptimizer, args: JsonValue) -> AppResult<JsonValue> {
    debug!(target: "app::tool", "analyzing schedule with args: {}", args);

    validate_args(&args)?;
    let params: AnalyzeScheduleParams = extract_params(&args)?;

    let analysis = match &params.preferences {
        Some(update) => {
            let preferences = optimizer.preferences().apply_update(update)?;
            optimizer.analyze_with_preferences(&params.events, &preferences)
        }
        None => optimizer.analyze(&params.events),
    };

    Ok(json!({
        "success": true,
        "summary": summarize(&analysis),
        "escalation": analysis.escalation_level(),
        "analysis": analysis,
    }))
}
