//! Alertmanager Webhook Route

use alert_render::WebhookPayload;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use metrics::counter;
use std::sync::Arc;
use tracing::info;

use crate::{ApiError, AppState};

/// Render the batch into one message and deliver it
///
/// The body is decoded whatever its `Content-Type`; Alertmanager setups
/// behind proxies do not always preserve the header.
pub async fn receive(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    let result = relay(&state, body).await;

    let outcome = match &result {
        Ok(_) => "delivered",
        Err(e) => e.outcome(),
    };
    counter!("webhook_requests_total", "outcome" => outcome).increment(1);

    result.map(|alert_count| {
        info!(alerts = alert_count, "Webhook batch relayed");
        StatusCode::OK
    })
}

async fn relay(state: &AppState, body: Result<Bytes, BytesRejection>) -> Result<usize, ApiError> {
    let body = body?;
    let payload: WebhookPayload = serde_json::from_slice(&body)?;

    let message = state.renderer.render(&payload.alerts)?;
    for alert in &payload.alerts {
        let status = if alert.status.is_firing() { "firing" } else { "resolved" };
        counter!("webhook_alerts_total", "status" => status).increment(1);
    }

    let notification = state.notification(message);
    state.notifier.send(&notification).await?;

    Ok(payload.alerts.len())
}
