//! Queue backend trait definition.

use async_trait::async_trait;

use crate::Result;

/// One received message: the raw body plus the receipt token that
/// acknowledges this specific delivery.
#[derive(Debug, Clone)]
pub struct QueueDelivery {
    pub body: String,
    pub receipt: String,
}

/// Trait for message queue backends.
///
/// Deliveries are at-least-once: a received message that is never deleted
/// becomes visible again under the backend's redelivery policy.
#[async_trait]
pub trait QueueBackend: Send + Sync {
    /// Receive at most one delivery; `None` when no message is available.
    async fn receive(&self) -> Result<Option<QueueDelivery>>;

    /// Acknowledge a delivery so it is not redelivered.
    async fn delete(&self, receipt: &str) -> Result<()>;
}
