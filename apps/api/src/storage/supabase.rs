use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::{AnalysisStore, StoreError, ANALYSES_TABLE};
use crate::models::analysis::AnalysisRecord;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Inserts rows through Supabase's PostgREST endpoint using the service-role key.
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    rest_url: String,
    service_role_key: String,
}

impl SupabaseStore {
    pub fn new(project_url: &str, service_role_key: String) -> Result<Self, StoreError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            rest_url: table_url(project_url, ANALYSES_TABLE),
            service_role_key,
        })
    }
}

fn table_url(project_url: &str, table: &str) -> String {
    format!("{}/rest/v1/{table}", project_url.trim_end_matches('/'))
}

/// The columns a Supabase `resume_analyses` table is guaranteed to have. `id` and
/// `created_at` are left to column defaults and `is_fallback` is not sent.
#[derive(Debug, Serialize)]
struct SupabaseRow<'a> {
    email: &'a str,
    job_role: Option<&'a str>,
    ats_score: i32,
    overall_summary: &'a str,
    strengths: &'a [String],
    missing_or_weak_areas: &'a [String],
    ats_keyword_gaps: &'a [String],
    improvement_suggestions: &'a [String],
    structure_feedback: &'a [String],
    final_recommendation: &'a str,
    resume_hash: &'a str,
}

impl<'a> From<&'a AnalysisRecord> for SupabaseRow<'a> {
    fn from(record: &'a AnalysisRecord) -> Self {
        Self {
            email: &record.email,
            job_role: record.job_role.as_deref(),
            ats_score: record.ats_score,
            overall_summary: &record.overall_summary,
            strengths: &record.strengths,
            missing_or_weak_areas: &record.missing_or_weak_areas,
            ats_keyword_gaps: &record.ats_keyword_gaps,
            improvement_suggestions: &record.improvement_suggestions,
            structure_feedback: &record.structure_feedback,
            final_recommendation: &record.final_recommendation,
            resume_hash: &record.resume_hash,
        }
    }
}

#[async_trait]
impl AnalysisStore for SupabaseStore {
    async fn store(&self, record: &AnalysisRecord) -> Result<(), StoreError> {
        let response = self
            .client
            .post(&self.rest_url)
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .header("Prefer", "return=minimal")
            .json(&SupabaseRow::from(record))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(resume_hash = %record.resume_hash, "Supabase insert acknowledged ({status})");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::AnalysisResult;

    #[test]
    fn test_table_url_normalizes_trailing_slash() {
        assert_eq!(
            table_url("https://abc.supabase.co/", "resume_analyses"),
            "https://abc.supabase.co/rest/v1/resume_analyses"
        );
        assert_eq!(
            table_url("https://abc.supabase.co", "resume_analyses"),
            "https://abc.supabase.co/rest/v1/resume_analyses"
        );
    }

    #[test]
    fn test_row_sends_only_table_columns() {
        let record = AnalysisRecord::new(
            "a@b.co",
            Some("Analyst"),
            &AnalysisResult::fallback(),
            "ab".repeat(32),
        );
        let json = serde_json::to_value(SupabaseRow::from(&record)).unwrap();
        let columns: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();

        assert_eq!(columns.len(), 11);
        for absent in ["id", "is_fallback", "created_at"] {
            assert!(!columns.contains(&absent), "{absent} must not be posted");
        }
        assert_eq!(json["email"], "a@b.co");
        assert_eq!(json["job_role"], "Analyst");
        assert_eq!(json["improvement_suggestions"][0], "Please retry analysis later.");
        assert_eq!(json["resume_hash"], "ab".repeat(32));
    }
}
