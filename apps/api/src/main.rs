mod analysis;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod report;
mod routes;
mod state;
mod storage;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use tower_http::{
    cors::{AllowHeaders, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::extract::PdfTextExtractor;
use crate::config::{Config, EmailDelivery};
use crate::llm_client::GeminiClient;
use crate::report::{ReportMailer, ReportRenderer, SmtpMailer};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{AnalysisStore, PgAnalysisStore, SupabaseStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumyZer API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize AI client
    let ai = GeminiClient::new(config.gemini_api_key.clone())
        .context("Failed to build Gemini HTTP client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize persistence
    let store: Arc<dyn AnalysisStore> = match &config.database_url {
        Some(url) => {
            let pool = db::connect_and_migrate(url).await?;
            info!("Analyses will be stored via direct Postgres connection");
            Arc::new(PgAnalysisStore::new(pool))
        }
        None => {
            let store = SupabaseStore::new(
                &config.supabase_url,
                config.supabase_service_role_key.clone(),
            )
            .context("Failed to build Supabase HTTP client")?;
            info!("Analyses will be stored via Supabase REST");
            Arc::new(store)
        }
    };

    // Initialize report delivery
    let mailer: Option<Arc<dyn ReportMailer>> = match (config.email_delivery, &config.smtp) {
        (EmailDelivery::Backend, Some(smtp)) => {
            let renderer = Arc::new(ReportRenderer::new().context("Invalid report template")?);
            info!("Report emails sent by backend via {}:{}", smtp.host, smtp.port);
            let mailer = SmtpMailer::new(smtp, renderer)?;
            Some(Arc::new(mailer) as Arc<dyn ReportMailer>)
        }
        _ => {
            info!(
                emailjs_configured = config.emailjs.is_configured(),
                "Report emails handled by frontend"
            );
            None
        }
    };

    // Build app state
    let state = AppState {
        ai: Arc::new(ai),
        extractor: Arc::new(PdfTextExtractor),
        store,
        mailer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config.allowed_origins)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS for the configured frontend origins. Credentials are allowed, so headers are
/// mirrored from the request rather than wildcarded.
fn build_cors(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
