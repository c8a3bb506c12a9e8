//! Gotify Message Payload

use serde::Serialize;

/// Title used when none is configured
pub const DEFAULT_TITLE: &str = "Prometheus Alert";

/// Priority used when none is configured
pub const DEFAULT_PRIORITY: i64 = 5;

/// Body of `POST /message` on a Gotify server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub title: String,
    pub message: String,
    pub priority: i64,
}

impl NotificationPayload {
    /// Create a payload
    pub fn new(title: impl Into<String>, message: impl Into<String>, priority: i64) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            priority,
        }
    }
}
