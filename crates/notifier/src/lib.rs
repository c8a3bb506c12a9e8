//! Push Notification Delivery
//!
//! Wraps a rendered alert message into a Gotify message and posts it to
//! the configured server. Delivery is attempted once; failures are
//! returned to the caller.

mod channel;
mod error;
mod gotify;
mod payload;

pub use channel::Notifier;
pub use error::DeliveryError;
pub use gotify::{GotifyConfig, GotifyNotifier, GOTIFY_KEY_HEADER};
pub use payload::{NotificationPayload, DEFAULT_PRIORITY, DEFAULT_TITLE};
