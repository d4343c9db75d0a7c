//! Analysis orchestrator — turns résumé text into an `AnalysisResult` while treating the
//! AI service as unreliable.
//!
//! Each attempt runs a two-stage parse over the raw reply:
//! 1. isolation: slice from the first `{` to the last `}` inclusive, tolerating prose or
//!    markdown fences the model emits despite instructions;
//! 2. strict parse of the slice as a JSON object, followed by normalization.
//!
//! Any failure consumes the attempt. After `MAX_ATTEMPTS` failures the fixed fallback is
//! returned. `analyze_resume` never returns an error.

use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::analysis::models::AnalysisResult;
use crate::analysis::prompts::build_resume_prompt;
use crate::llm_client::{AiService, LlmError};

/// Total calls made to the AI service per analysis (one retry).
pub const MAX_ATTEMPTS: u32 = 2;

const MIN_SCORE: i64 = 0;
const MAX_SCORE: i64 = 100;

/// Why a single AI attempt was rejected.
#[derive(Debug, Error)]
pub enum AnalysisFailure {
    #[error("AI service call failed: {0}")]
    Service(#[from] LlmError),

    #[error("AI service returned an empty response")]
    EmptyResponse,

    #[error("no JSON object found in AI response")]
    NoJsonObject,

    #[error("AI response is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("AI response JSON is not an object")]
    NotAnObject,

    #[error("ats_score is not numeric: {0}")]
    InvalidScore(String),
}

/// Runs the bounded-retry analysis protocol.
pub async fn analyze_resume(
    ai: &dyn AiService,
    resume_text: &str,
    job_role: Option<&str>,
) -> AnalysisResult {
    let prompt = build_resume_prompt(resume_text, job_role);
    let mut last_failure = None;

    for attempt in 1..=MAX_ATTEMPTS {
        match attempt_analysis(ai, &prompt).await {
            Ok(result) => {
                info!(attempt, ats_score = result.ats_score, "AI analysis succeeded");
                return result;
            }
            Err(failure) => {
                warn!(attempt, error = %failure, "AI analysis attempt failed");
                last_failure = Some(failure);
            }
        }
    }

    error!(
        attempts = MAX_ATTEMPTS,
        last_error = ?last_failure,
        "AI analysis fallback activated"
    );
    AnalysisResult::fallback()
}

async fn attempt_analysis(
    ai: &dyn AiService,
    prompt: &str,
) -> Result<AnalysisResult, AnalysisFailure> {
    let raw = ai.generate(prompt).await?;
    parse_analysis(&raw)
}

/// Parses one raw model reply into a normalized result.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, AnalysisFailure> {
    if raw.trim().is_empty() {
        return Err(AnalysisFailure::EmptyResponse);
    }

    let payload = isolate_json_object(raw).ok_or(AnalysisFailure::NoJsonObject)?;
    let value: Value = serde_json::from_str(payload)?;
    normalize(value)
}

/// Returns the substring from the first `{` to the last `}` inclusive.
pub fn isolate_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

fn normalize(value: Value) -> Result<AnalysisResult, AnalysisFailure> {
    let Value::Object(mut fields) = value else {
        return Err(AnalysisFailure::NotAnObject);
    };

    let score = match fields.remove("ats_score") {
        Some(raw_score) => coerce_score(&raw_score)?,
        None => 0,
    };

    fields.remove("is_fallback");
    let mut result: AnalysisResult = serde_json::from_value(Value::Object(fields))?;
    result.ats_score = clamp_score(score);
    result.is_fallback = false;
    Ok(result)
}

/// Integers pass through, floats truncate toward zero, numeric strings are parsed (out of
/// range values saturate) and booleans count as 0/1. Anything else rejects the attempt.
fn coerce_score(value: &Value) -> Result<i64, AnalysisFailure> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| AnalysisFailure::InvalidScore(n.to_string())),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                })
                .ok_or_else(|| AnalysisFailure::InvalidScore(s.clone()))
        }
        Value::Bool(b) => Ok(i64::from(*b)),
        other => Err(AnalysisFailure::InvalidScore(other.to_string())),
    }
}

fn clamp_score(score: i64) -> i32 {
    score.clamp(MIN_SCORE, MAX_SCORE) as i32
}
