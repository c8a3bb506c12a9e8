//! Delivery Error Types

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while delivering a notification
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Payload could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request never produced a response (connect, DNS, TLS, ...)
    #[error("Request to push service failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Push service answered with something other than 200
    #[error("Push service returned non-200 status: {0}")]
    Status(StatusCode),
}
