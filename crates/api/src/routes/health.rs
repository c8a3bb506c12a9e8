//! Liveness Route

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub notifier: String,
    pub timezone: String,
}

/// Health check handler
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let timezone = state.renderer.formatter();
    let status = if timezone.is_degraded() { "degraded" } else { "healthy" };

    Json(HealthResponse {
        status: status.to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        notifier: state.notifier.name().to_string(),
        timezone: timezone.zone_name().to_string(),
    })
}
