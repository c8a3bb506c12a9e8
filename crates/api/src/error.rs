//! Request Error Handling
//!
//! Every per-request failure ends here and becomes a status code plus a
//! short plain-text body. Details go to the log, not to the caller.

use alert_render::RenderError;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use notifier::DeliveryError;
use thiserror::Error;
use tracing::{error, warn};

/// Errors raised while handling a webhook call
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body could not be read, e.g. it exceeds the configured size limit
    #[error("Failed to read request body: {0}")]
    Body(#[from] BytesRejection),

    /// Body is not JSON or not an Alertmanager payload
    #[error("Failed to decode JSON payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Message could not be rendered; nothing was sent
    #[error("Failed to render alert message: {0}")]
    Render(#[from] RenderError),

    /// Push service unreachable or rejected the message
    #[error("Failed to send alert to Gotify: {0}")]
    Delivery(#[from] DeliveryError),
}

impl ApiError {
    /// Metric label for this failure
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::Body(_) | ApiError::Decode(_) => "rejected",
            ApiError::Render(_) => "render_failed",
            ApiError::Delivery(_) => "delivery_failed",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Decode(_) => StatusCode::BAD_REQUEST,
            ApiError::Render(_) | ApiError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ApiError::Body(_) => "Failed to read request body",
            ApiError::Decode(_) => "Failed to decode JSON payload",
            ApiError::Render(_) => "Failed to render alert message",
            ApiError::Delivery(_) => "Failed to send alert to Gotify",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Body(_) | ApiError::Decode(_) => warn!("Rejected webhook call: {}", self),
            _ => error!("{}", self),
        }

        (self.status(), self.public_message()).into_response()
    }
}
