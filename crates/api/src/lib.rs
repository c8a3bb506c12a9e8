//! Alert Relay Server
//!
//! Receives Alertmanager webhook calls on `POST /webhook`, renders every
//! batch into one message and pushes it to Gotify.

use alert_render::{AlertRenderer, TimeFormatter};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use notifier::{
    DeliveryError, GotifyConfig, GotifyNotifier, NotificationPayload, Notifier, DEFAULT_PRIORITY,
    DEFAULT_TITLE,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_governor::GovernorLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
mod error;
pub mod rate_limit;
mod routes;

pub use config::{ConfigError, LogFormat, Settings};
pub use error::ApiError;

/// Largest webhook body accepted when none is configured (32 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Application state shared across handlers; read-only after start
pub struct AppState {
    /// Batch renderer
    pub renderer: AlertRenderer,
    /// Delivery target
    pub notifier: Arc<dyn Notifier>,
    /// Notification title
    pub title: String,
    /// Notification priority
    pub priority: i64,
    /// Largest accepted webhook body
    pub max_body_bytes: usize,
    /// Prometheus handle, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
}

impl AppState {
    /// Create state with the default title and priority
    pub fn new(renderer: AlertRenderer, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            renderer,
            notifier,
            title: DEFAULT_TITLE.to_string(),
            priority: DEFAULT_PRIORITY,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }

    /// Build the production state: Gotify notifier and configured timezone
    pub fn from_settings(settings: &Settings) -> Result<Self, DeliveryError> {
        let renderer = AlertRenderer::new(TimeFormatter::new(&settings.timezone));
        let notifier = GotifyNotifier::new(GotifyConfig::new(
            settings.gotify_url.clone(),
            settings.gotify_token.clone(),
        ))?;

        Ok(Self::new(renderer, Arc::new(notifier))
            .with_notification_defaults(settings.notify_title.clone(), settings.notify_priority)
            .with_max_body_bytes(settings.max_body_bytes))
    }

    /// Override title and priority
    pub fn with_notification_defaults(mut self, title: impl Into<String>, priority: i64) -> Self {
        self.title = title.into();
        self.priority = priority;
        self
    }

    /// Override the webhook body size limit
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Attach a Prometheus handle for `GET /metrics`
    pub fn with_metrics_handle(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Wrap a rendered message into the payload sent to the notifier
    pub fn notification(&self, message: String) -> NotificationPayload {
        NotificationPayload::new(self.title.clone(), message, self.priority)
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_body_bytes);

    Router::new()
        .route("/webhook", post(routes::webhook::receive).layer(body_limit))
        .route("/health", get(routes::health::health))
        .route("/metrics", get(routes::metrics::render))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize logging
pub fn init_logging(
    level: Level,
    format: LogFormat,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    match format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    }
}

/// Run the server until it fails
pub async fn run_server(settings: Settings, metrics: Option<PrometheusHandle>) -> anyhow::Result<()> {
    let addr = settings.listen_addr()?;

    let mut state = AppState::from_settings(&settings)?;
    if let Some(handle) = metrics {
        state = state.with_metrics_handle(handle);
    }

    let mut app = create_router(Arc::new(state));
    if let Some(limit) = settings.rate_limit() {
        info!(
            "Rate limiting webhook callers: burst {}, one request per {}s",
            limit.burst_size, limit.per_second
        );
        let config = rate_limit::create_governor_config(&limit)?;
        app = app.layer(GovernorLayer { config });
    }

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
