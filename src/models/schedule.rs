use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Work,
    Court,
    Family,
    Personal,
    Recovery,
    #[default]
    #[serde(other)]
    Other,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Work => "work",
            EventCategory::Court => "court",
            EventCategory::Family => "family",
            EventCategory::Personal => "personal",
            EventCategory::Recovery => "recovery",
            EventCategory::Other => "other",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EventCategory {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "work" => Ok(EventCategory::Work),
            "court" => Ok(EventCategory::Court),
            "family" => Ok(EventCategory::Family),
            "personal" => Ok(EventCategory::Personal),
            "recovery" => Ok(EventCategory::Recovery),
            "other" => Ok(EventCategory::Other),
            other => Err(format!("unsupported event category: {other}")),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum EventPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl EventPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventPriority::Low => "low",
            EventPriority::Medium => "medium",
            EventPriority::High => "high",
            EventPriority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for EventPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EventPriority {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "low" => Ok(EventPriority::Low),
            "medium" => Ok(EventPriority::Medium),
            "high" => Ok(EventPriority::High),
            "urgent" => Ok(EventPriority::Urgent),
            other => Err(format!("unsupported event priority: {other}")),
        }
    }
}

/// A calendar entry as handed over by the event store.
///
/// Instants are RFC3339 strings; empty or unparsable values are tolerated and
/// surface as an `invalid_item` finding instead of an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub start_at: String,
    #[serde(default)]
    pub end_at: String,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default)]
    pub priority: EventPriority,
}

impl ScheduledItem {
    /// Trimmed location, `None` when absent or blank.
    pub fn location_label(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn is_urgent(&self) -> bool {
        self.priority == EventPriority::Urgent
    }
}
