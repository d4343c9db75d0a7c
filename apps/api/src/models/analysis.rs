use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::models::AnalysisResult;

/// One row of `resume_analyses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub email: String,
    pub job_role: Option<String>,
    pub ats_score: i32,
    pub overall_summary: String,
    pub strengths: Vec<String>,
    pub missing_or_weak_areas: Vec<String>,
    pub ats_keyword_gaps: Vec<String>,
    pub improvement_suggestions: Vec<String>,
    pub structure_feedback: Vec<String>,
    pub final_recommendation: String,
    pub is_fallback: bool,
    pub resume_hash: String,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn new(
        email: &str,
        job_role: Option<&str>,
        result: &AnalysisResult,
        resume_hash: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            job_role: job_role.map(String::from),
            ats_score: result.ats_score,
            overall_summary: result.overall_summary.clone(),
            strengths: result.strengths.clone(),
            missing_or_weak_areas: result.missing_or_weak_areas.clone(),
            ats_keyword_gaps: result.ats_keyword_gaps.clone(),
            improvement_suggestions: result.improvement_suggestions.clone(),
            structure_feedback: result.structure_feedback.clone(),
            final_recommendation: result.final_recommendation.clone(),
            is_fallback: result.is_fallback,
            resume_hash,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_copies_result_fields() {
        let result = AnalysisResult {
            ats_score: 77,
            overall_summary: "Good".to_string(),
            strengths: vec!["SQL".to_string()],
            ..Default::default()
        };
        let record = AnalysisRecord::new("a@b.co", Some("Analyst"), &result, "ff".repeat(32));

        assert_eq!(record.ats_score, 77);
        assert_eq!(record.strengths, vec!["SQL"]);
        assert_eq!(record.job_role.as_deref(), Some("Analyst"));
        assert!(!record.is_fallback);
        assert_eq!(record.resume_hash.len(), 64);
    }

    #[test]
    fn test_record_serializes_lists_as_arrays() {
        let record = AnalysisRecord::new("a@b.co", None, &AnalysisResult::fallback(), String::new());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["strengths"].as_array().unwrap().is_empty());
        assert!(json["job_role"].is_null());
        assert_eq!(json["is_fallback"], true);
    }
}
