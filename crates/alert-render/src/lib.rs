//! Alert Rendering
//!
//! Decodes Alertmanager webhook alerts and renders a whole batch into a
//! single human-readable notification message.

mod alert;
mod error;
mod renderer;
mod time;

pub use alert::{Alert, AlertStatus, WebhookPayload};
pub use error::RenderError;
pub use renderer::{AlertRenderer, FIRING_MARKER, RESOLVED_MARKER};
pub use time::{FormattedTime, TimeFormatter, DEFAULT_TIMEZONE, TIME_LAYOUT};
