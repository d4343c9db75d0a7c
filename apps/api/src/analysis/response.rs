use serde::{Deserialize, Serialize};

use crate::analysis::models::AnalysisResult;

/// What happened to the report email for this request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
    /// Backend sending is off; the frontend dispatches the email itself.
    HandledByFrontend,
    /// The backend queued the report for SMTP delivery.
    QueuedByBackend,
    /// Backend delivery is on but no deliverable address was available.
    NotSent,
}

/// Public payload of `POST /api/analyze-resume`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResumeResponse {
    pub ats_score: i32,
    pub summary: String,
    /// Same text as `summary`, under the field name the analysis itself uses.
    pub overall_summary: String,
    pub strengths: Vec<String>,
    pub missing_or_weak_areas: Vec<String>,
    pub ats_keyword_gaps: Vec<String>,
    pub improvement_suggestions: Vec<String>,
    pub structure_feedback: Vec<String>,
    pub final_recommendation: String,
    pub email_status: EmailStatus,
    pub extracted_email: String,
    pub is_fallback: bool,
}

pub fn compose_response(
    result: &AnalysisResult,
    extracted_email: String,
    email_status: EmailStatus,
) -> AnalyzeResumeResponse {
    AnalyzeResumeResponse {
        ats_score: result.ats_score,
        summary: result.overall_summary.clone(),
        overall_summary: result.overall_summary.clone(),
        strengths: result.strengths.clone(),
        missing_or_weak_areas: result.missing_or_weak_areas.clone(),
        ats_keyword_gaps: result.ats_keyword_gaps.clone(),
        improvement_suggestions: result.improvement_suggestions.clone(),
        structure_feedback: result.structure_feedback.clone(),
        final_recommendation: result.final_recommendation.clone(),
        email_status,
        extracted_email,
        is_fallback: result.is_fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_status_wire_values() {
        assert_eq!(
            serde_json::to_value(EmailStatus::HandledByFrontend).unwrap(),
            "handled_by_frontend"
        );
        assert_eq!(
            serde_json::to_value(EmailStatus::QueuedByBackend).unwrap(),
            "queued_by_backend"
        );
        assert_eq!(serde_json::to_value(EmailStatus::NotSent).unwrap(), "not_sent");
    }

    #[test]
    fn test_compose_maps_summary_and_keeps_fallback_flag() {
        let result = AnalysisResult::fallback();
        let response = compose_response(
            &result,
            "unknown@example.com".to_string(),
            EmailStatus::HandledByFrontend,
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["ats_score"], 0);
        assert_eq!(json["summary"], result.overall_summary.as_str());
        assert_eq!(json["overall_summary"], result.overall_summary.as_str());
        assert_eq!(json["email_status"], "handled_by_frontend");
        assert_eq!(json["extracted_email"], "unknown@example.com");
        assert_eq!(json["is_fallback"], true);
        assert_eq!(json["improvement_suggestions"][0], "Please retry analysis later.");
    }
}
