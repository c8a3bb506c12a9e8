//! Process Configuration
//!
//! Read once from the environment at start-up. `GOTIFY_URL` and
//! `GOTIFY_TOKEN` are mandatory; everything else has a default.

use config::{Config, Environment};
use serde::Deserialize;
use std::net::SocketAddr;
use thiserror::Error;
use tracing::Level;

use crate::rate_limit::RateLimitConfig;

/// Start-up configuration errors; any of these aborts the process
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("{0} must be set in environment variables")]
    Missing(&'static str),

    #[error("Invalid listen address {0}")]
    InvalidListenAddress(String),

    #[error("Invalid log level {0}")]
    InvalidLogLevel(String),

    #[error("MAX_BODY_BYTES must be greater than zero")]
    InvalidBodyLimit,

    #[error("Invalid rate limit: per_second={per_second}, burst={burst}")]
    InvalidRateLimit { per_second: u64, burst: u32 },
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Relay settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Gotify message endpoint
    pub gotify_url: String,
    /// Gotify application token
    pub gotify_token: String,
    pub listen_host: String,
    pub listen_port: u16,
    /// IANA zone used for alert timestamps
    pub timezone: String,
    pub notify_title: String,
    pub notify_priority: i64,
    pub log_level: String,
    pub log_format: LogFormat,
    pub rate_limit_enabled: bool,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
    /// Largest accepted webhook body
    pub max_body_bytes: usize,
}

impl Settings {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::default())
    }

    /// Load from an explicit variable map, keyed like the environment
    pub fn from_map(vars: config::Map<String, String>) -> Result<Self, ConfigError> {
        Self::load(Environment::default().source(Some(vars)))
    }

    fn load(environment: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("gotify_url", "")?
            .set_default("gotify_token", "")?
            .set_default("listen_host", "0.0.0.0")?
            .set_default("listen_port", 9110_i64)?
            .set_default("timezone", alert_render::DEFAULT_TIMEZONE)?
            .set_default("notify_title", notifier::DEFAULT_TITLE)?
            .set_default("notify_priority", notifier::DEFAULT_PRIORITY)?
            .set_default("log_level", "info")?
            .set_default("log_format", "text")?
            .set_default("rate_limit_enabled", false)?
            .set_default("rate_limit_per_second", 2_i64)?
            .set_default("rate_limit_burst", 5_i64)?
            .set_default("max_body_bytes", crate::DEFAULT_MAX_BODY_BYTES as i64)?
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.gotify_url.trim().is_empty() {
            return Err(ConfigError::Missing("GOTIFY_URL"));
        }
        if self.gotify_token.trim().is_empty() {
            return Err(ConfigError::Missing("GOTIFY_TOKEN"));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidBodyLimit);
        }
        self.listen_addr()?;
        self.max_level()?;
        Ok(())
    }

    /// Socket address to bind
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.listen_host, self.listen_port);
        addr.parse()
            .map_err(|_| ConfigError::InvalidListenAddress(addr))
    }

    /// Most verbose level that gets logged
    pub fn max_level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Limiter settings, if limiting is switched on
    pub fn rate_limit(&self) -> Option<RateLimitConfig> {
        self.rate_limit_enabled.then(|| RateLimitConfig {
            per_second: self.rate_limit_per_second,
            burst_size: self.rate_limit_burst,
        })
    }
}
