//! Prometheus Exposition Route

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::AppState;

#[tracing::instrument(skip(state))]
pub async fn render(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to get the metrics handle".to_string(),
        ),
    }
}
