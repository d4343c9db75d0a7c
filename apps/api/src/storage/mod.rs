//! Persistence sinks for finished analyses.
//!
//! `AppState` carries an `Arc<dyn AnalysisStore>`; the backend is picked at startup:
//! `PgAnalysisStore` when `DATABASE_URL` is set, `SupabaseStore` otherwise.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::analysis::AnalysisRecord;

pub mod postgres;
pub mod supabase;

pub use postgres::PgAnalysisStore;
pub use supabase::SupabaseStore;

pub const ANALYSES_TABLE: &str = "resume_analyses";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn store(&self, record: &AnalysisRecord) -> Result<(), StoreError>;
}
