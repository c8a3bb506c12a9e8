//! Alertmanager Webhook Model

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Status of one alert as reported by Alertmanager
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum AlertStatus {
    /// Condition is currently active
    Firing,
    /// Condition has cleared
    Resolved,
    /// Anything else the sender put in `status`; rendered like `Resolved`
    Other(String),
}

impl AlertStatus {
    /// Whether the alert takes the firing layout
    pub fn is_firing(&self) -> bool {
        matches!(self, AlertStatus::Firing)
    }

    /// Raw status string
    pub fn as_str(&self) -> &str {
        match self {
            AlertStatus::Firing => "firing",
            AlertStatus::Resolved => "resolved",
            AlertStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for AlertStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "firing" => AlertStatus::Firing,
            "resolved" => AlertStatus::Resolved,
            _ => AlertStatus::Other(raw),
        }
    }
}

impl From<&str> for AlertStatus {
    fn from(raw: &str) -> Self {
        AlertStatus::from(raw.to_string())
    }
}

/// A single alert from the webhook batch
#[derive(Debug, Clone, Deserialize)]
pub struct Alert {
    pub status: AlertStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: HashMap<String, String>,
    #[serde(rename = "startsAt")]
    pub starts_at: DateTime<FixedOffset>,
    /// Only meaningful once the alert is resolved
    #[serde(rename = "endsAt")]
    pub ends_at: DateTime<FixedOffset>,
}

impl Alert {
    /// Create an alert with empty label and annotation sets
    pub fn new(
        status: impl Into<AlertStatus>,
        starts_at: DateTime<FixedOffset>,
        ends_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            status: status.into(),
            labels: HashMap::new(),
            annotations: HashMap::new(),
            starts_at,
            ends_at,
        }
    }

    /// Add a label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Add an annotation
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    /// Label value, or "" when the label is absent
    pub fn label(&self, key: &str) -> &str {
        self.labels.get(key).map(String::as_str).unwrap_or_default()
    }

    /// Annotation value, or "" when the annotation is absent
    pub fn annotation(&self, key: &str) -> &str {
        self.annotations.get(key).map(String::as_str).unwrap_or_default()
    }
}

/// Body of an Alertmanager webhook call
///
/// Only `alerts` is read; the group-level fields Alertmanager also sends
/// (`receiver`, `groupKey`, `commonLabels`, ...) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub alerts: Vec<Alert>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
