use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_SCORE: i32 = 50;
const UNKNOWN: &str = "unknown";
const DISABLED_RESPONSE: &str = "Thank you for your interest. We'll get back to you soon!";
const FALLBACK_RESPONSE: &str =
    "Thank you for reaching out! We appreciate your interest and will review your message carefully.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl LeadPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            LeadPriority::Low => "low",
            LeadPriority::Medium => "medium",
            LeadPriority::High => "high",
            LeadPriority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for LeadPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative signals about a lead. The four named keys are always present,
/// whether the model omitted them or sent `null`; anything else it returns is
/// kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadInsights {
    #[serde(default = "unknown", deserialize_with = "unknown_if_null")]
    pub urgency: String,
    #[serde(default = "unknown", deserialize_with = "unknown_if_null")]
    pub budget: String,
    #[serde(default = "unknown", deserialize_with = "unknown_if_null")]
    pub industry: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub pain_points: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

fn unknown_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown))
}

fn empty_if_null<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl LeadInsights {
    fn with_urgency(urgency: &str) -> Self {
        Self {
            urgency: urgency.to_string(),
            budget: unknown(),
            industry: unknown(),
            pain_points: vec![],
            extra: Map::new(),
        }
    }
}

/// The scoring payload the model is asked to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadAssessment {
    #[serde(deserialize_with = "deserialize_score")]
    pub score: i32,
    pub priority: LeadPriority,
    pub insights: LeadInsights,
    pub suggested_response: String,
}

/// Accepts integral or fractional JSON numbers; fractions are rounded.
fn deserialize_score<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Err(serde::de::Error::custom("score must be a finite number"));
    }
    Ok(raw.round() as i32)
}

/// Where a `ScoringResult` came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringSource {
    /// Parsed from a genuine model response.
    Model,
    /// No model credential is configured.
    Disabled,
    /// The model was tried and the attempt failed.
    Fallback { error: String },
}

/// Outcome of one analysis attempt. Created per submission and discarded once its
/// fields are copied onto the contact.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringResult {
    pub assessment: LeadAssessment,
    pub source: ScoringSource,
}

impl ScoringResult {
    pub fn from_model(assessment: LeadAssessment) -> Self {
        Self {
            assessment,
            source: ScoringSource::Model,
        }
    }

    pub fn disabled() -> Self {
        Self {
            assessment: LeadAssessment {
                score: DEFAULT_SCORE,
                priority: LeadPriority::Medium,
                insights: LeadInsights::with_urgency(UNKNOWN),
                suggested_response: DISABLED_RESPONSE.to_string(),
            },
            source: ScoringSource::Disabled,
        }
    }

    pub fn fallback(error: impl Into<String>) -> Self {
        Self {
            assessment: LeadAssessment {
                score: DEFAULT_SCORE,
                priority: LeadPriority::Medium,
                insights: LeadInsights::with_urgency("medium"),
                suggested_response: FALLBACK_RESPONSE.to_string(),
            },
            source: ScoringSource::Fallback {
                error: error.into(),
            },
        }
    }

    pub fn ai_enabled(&self) -> bool {
        matches!(self.source, ScoringSource::Model)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.source {
            ScoringSource::Fallback { error } => Some(error),
            _ => None,
        }
    }

    pub fn source_label(&self) -> &'static str {
        match self.source {
            ScoringSource::Model => "model",
            ScoringSource::Disabled => "disabled",
            ScoringSource::Fallback { .. } => "fallback",
        }
    }
}
