use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Liveness message kept for the hosted frontend's uptime probe.
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "status": "ResumyZer backend running" }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resumyzer-api"
    }))
}
