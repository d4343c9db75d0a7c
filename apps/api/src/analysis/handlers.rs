//! Axum route handler for the analysis pipeline.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{debug, error, info, warn};

use crate::analysis::email_resolver::{resolve_email, UNKNOWN_EMAIL};
use crate::analysis::fingerprint::fingerprint;
use crate::analysis::orchestrator::analyze_resume;
use crate::analysis::response::{compose_response, AnalyzeResumeResponse, EmailStatus};
use crate::analysis::validation::{truncate_text, validate_content_type, validate_extracted_text};
use crate::errors::AppError;
use crate::models::analysis::AnalysisRecord;
use crate::state::AppState;
use crate::storage::AnalysisStore;

/// One upload, as received from the multipart form.
#[derive(Debug)]
pub struct AnalysisRequest {
    pub document: Bytes,
    pub content_type: Option<String>,
    pub email: Option<String>,
    pub job_role: Option<String>,
}

impl AnalysisRequest {
    /// Reads the `resume`, `email` and `job_role` fields; unknown fields are ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut document = None;
        let mut content_type = None;
        let mut email = None;
        let mut job_role = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resume" => {
                    content_type = field.content_type().map(String::from);
                    document = Some(field.bytes().await?);
                }
                "email" => email = non_blank(field.text().await?),
                "job_role" => job_role = non_blank(field.text().await?),
                _ => {}
            }
        }

        let document = document
            .ok_or_else(|| AppError::Validation("A resume file is required".to_string()))?;

        Ok(Self {
            document,
            content_type,
            email,
            job_role,
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// POST /api/analyze-resume
///
/// Validate → extract → resolve email → AI analysis → fingerprint → persist → respond.
/// Only validation and unreadable-document errors reach the caller.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResumeResponse>, AppError> {
    let request = AnalysisRequest::from_multipart(multipart).await?;
    let response = run_analysis(&state, request).await?;
    Ok(Json(response))
}

pub async fn run_analysis(
    state: &AppState,
    request: AnalysisRequest,
) -> Result<AnalyzeResumeResponse, AppError> {
    if let Err(e) = validate_content_type(request.content_type.as_deref()) {
        warn!(content_type = ?request.content_type, "Rejected upload: {e}");
        return Err(e.into());
    }

    let raw_text = state.extractor.extract(request.document).await?;
    let resume_text = truncate_text(&raw_text);
    if let Err(e) = validate_extracted_text(resume_text) {
        warn!("Rejected upload: {e}");
        return Err(e.into());
    }
    info!(chars = resume_text.chars().count(), "Resume text extracted");

    let email = resolve_email(request.email.as_deref(), resume_text);
    debug!(
        explicit = request.email.is_some(),
        found = email != UNKNOWN_EMAIL,
        "Contact email resolved"
    );

    let job_role = request.job_role.as_deref();
    let result = analyze_resume(state.ai.as_ref(), resume_text, job_role).await;

    let resume_hash = fingerprint(resume_text);
    debug!(resume_hash = %&resume_hash[..12], "Resume fingerprint computed");

    let record = AnalysisRecord::new(&email, job_role, &result, resume_hash);
    persist(state.store.as_ref(), &record).await;

    let email_status = match &state.mailer {
        None => EmailStatus::HandledByFrontend,
        Some(mailer) if mailer.queue_report(&email, &result, job_role) => {
            EmailStatus::QueuedByBackend
        }
        Some(_) => EmailStatus::NotSent,
    };

    Ok(compose_response(&result, email, email_status))
}

/// Storage outages must not cost the user their analysis: failures are logged only.
async fn persist(store: &dyn AnalysisStore, record: &AnalysisRecord) {
    match store.store(record).await {
        Ok(()) => info!(
            record_id = %record.id,
            ats_score = record.ats_score,
            is_fallback = record.is_fallback,
            "Analysis stored"
        ),
        Err(e) => error!(record_id = %record.id, "Failed to store analysis: {e}"),
    }
}
