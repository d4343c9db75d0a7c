use std::sync::Arc;

use crate::analysis::extract::TextExtractor;
use crate::llm_client::AiService;
use crate::report::ReportMailer;
use crate::storage::AnalysisStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every collaborator is a stateless facade behind a trait object, constructed once in
/// `main` and replaced with doubles in tests.
#[derive(Clone)]
pub struct AppState {
    pub ai: Arc<dyn AiService>,
    pub extractor: Arc<dyn TextExtractor>,
    pub store: Arc<dyn AnalysisStore>,
    /// Present only when the backend delivers report emails itself (`EMAIL_DELIVERY=backend`).
    pub mailer: Option<Arc<dyn ReportMailer>>,
}
