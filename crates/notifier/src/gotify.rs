//! Gotify Notifier

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::fmt;
use tracing::{error, info};

use crate::{DeliveryError, NotificationPayload, Notifier};

/// Header carrying the Gotify application token
pub const GOTIFY_KEY_HEADER: &str = "X-Gotify-Key";

/// Gotify endpoint and application token
#[derive(Clone)]
pub struct GotifyConfig {
    /// Full message URL, e.g. `https://gotify.example.com/message`
    pub url: String,
    /// Application token
    pub token: String,
}

impl GotifyConfig {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
        }
    }
}

impl fmt::Debug for GotifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GotifyConfig")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Delivers notifications to a Gotify server
pub struct GotifyNotifier {
    config: GotifyConfig,
    client: Client,
}

impl GotifyNotifier {
    /// Create a notifier with its own HTTP client
    pub fn new(config: GotifyConfig) -> Result<Self, DeliveryError> {
        let client = Client::builder().build()?;
        info!("Gotify notifier targeting {}", config.url);
        Ok(Self { config, client })
    }
}

#[async_trait]
impl Notifier for GotifyNotifier {
    fn name(&self) -> &str {
        "gotify"
    }

    async fn send(&self, payload: &NotificationPayload) -> Result<(), DeliveryError> {
        let body = serde_json::to_vec(payload)?;

        let response = self
            .client
            .post(&self.config.url)
            .header(CONTENT_TYPE, "application/json")
            .header(GOTIFY_KEY_HEADER, self.config.token.as_str())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(status = %status, url = %self.config.url, "Gotify rejected notification");
            return Err(DeliveryError::Status(status));
        }

        info!(title = %payload.title, "Alert sent to Gotify successfully");
        Ok(())
    }
}
