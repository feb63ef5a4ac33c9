//! Health check endpoints

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    research_service: bool,
}

/// Reports whether the research service was configured at startup
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let research_service = state.research_service.is_some();
    Json(HealthResponse {
        status: if research_service { "healthy" } else { "degraded" },
        research_service,
    })
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
}
