use async_trait::async_trait;
use sqlx::PgPool;

use super::{AnalysisStore, StoreError};
use crate::models::analysis::AnalysisRecord;

/// Writes rows straight into Postgres (Supabase's database or any compatible instance).
#[derive(Clone)]
pub struct PgAnalysisStore {
    pool: PgPool,
}

impl PgAnalysisStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisStore for PgAnalysisStore {
    async fn store(&self, record: &AnalysisRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO resume_analyses
                (id, email, job_role, ats_score, overall_summary, strengths,
                 missing_or_weak_areas, ats_keyword_gaps, improvement_suggestions,
                 structure_feedback, final_recommendation, is_fallback, resume_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(record.id)
        .bind(&record.email)
        .bind(&record.job_role)
        .bind(record.ats_score)
        .bind(&record.overall_summary)
        .bind(&record.strengths)
        .bind(&record.missing_or_weak_areas)
        .bind(&record.ats_keyword_gaps)
        .bind(&record.improvement_suggestions)
        .bind(&record.structure_feedback)
        .bind(&record.final_recommendation)
        .bind(record.is_fallback)
        .bind(&record.resume_hash)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
