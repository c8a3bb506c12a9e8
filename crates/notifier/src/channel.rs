use async_trait::async_trait;

use crate::{DeliveryError, NotificationPayload};

/// A destination for rendered alert notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;
    async fn send(&self, payload: &NotificationPayload) -> Result<(), DeliveryError>;
}
