use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const FALLBACK_SUMMARY: &str =
    "AI analysis could not be completed due to a temporary system issue.";
pub const FALLBACK_SUGGESTION: &str = "Please retry analysis later.";
pub const FALLBACK_RECOMMENDATION: &str = "Analysis incomplete due to AI service unavailability.";

/// Structured ATS evaluation of one résumé.
///
/// Every list defaults to empty and every string to `""`, so consumers never branch on
/// missing keys. Loosely typed model output is accepted: a bare string in a list slot becomes
/// a one-item list, and non-string values are kept as their JSON text. `ats_score` is always
/// within `0..=100` once produced by the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub ats_score: i32,
    #[serde(deserialize_with = "lenient_text")]
    pub overall_summary: String,
    #[serde(deserialize_with = "lenient_list")]
    pub strengths: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub missing_or_weak_areas: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub ats_keyword_gaps: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub improvement_suggestions: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub structure_feedback: Vec<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub final_recommendation: String,
    /// Set when the AI call failed and the fixed fallback content was substituted.
    pub is_fallback: bool,
}

impl AnalysisResult {
    /// The fixed result returned when every AI attempt failed.
    pub fn fallback() -> Self {
        Self {
            ats_score: 0,
            overall_summary: FALLBACK_SUMMARY.to_string(),
            strengths: vec![],
            missing_or_weak_areas: vec![],
            ats_keyword_gaps: vec![],
            improvement_suggestions: vec![FALLBACK_SUGGESTION.to_string()],
            structure_feedback: vec![],
            final_recommendation: FALLBACK_RECOMMENDATION.to_string(),
            is_fallback: true,
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().filter_map(list_item).collect(),
        single => list_item(single).into_iter().collect(),
    })
}

fn list_item(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
