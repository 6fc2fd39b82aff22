//! In-memory queue backend for testing.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::{QueueBackend, QueueDelivery};
use crate::error::QueueError;
use crate::{Error, Result};

/// In-memory queue with explicit in-flight tracking.
///
/// `receive` moves a message from pending to in-flight under a fresh
/// receipt; `delete` acknowledges it. Unacknowledged in-flight messages can
/// be requeued with [`MemoryQueue::redeliver`] to simulate the backend's
/// redelivery policy.
#[derive(Default)]
pub struct MemoryQueue {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    pending: VecDeque<String>,
    in_flight: HashMap<String, String>,
    deleted: usize,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a message body.
    pub fn push(&self, body: impl Into<String>) {
        self.inner.lock().unwrap().pending.push_back(body.into());
    }

    /// Move every unacknowledged in-flight message back to pending.
    pub fn redeliver(&self) {
        let mut inner = self.inner.lock().unwrap();
        let bodies: Vec<String> = inner.in_flight.drain().map(|(_, body)| body).collect();
        inner.pending.extend(bodies);
    }

    pub fn pending_len(&self) -> usize {
        self.inner.lock().unwrap().pending.len()
    }

    pub fn in_flight_len(&self) -> usize {
        self.inner.lock().unwrap().in_flight.len()
    }

    /// Number of deliveries acknowledged so far.
    pub fn deleted_count(&self) -> usize {
        self.inner.lock().unwrap().deleted
    }
}

#[async_trait]
impl QueueBackend for MemoryQueue {
    async fn receive(&self) -> Result<Option<QueueDelivery>> {
        let mut inner = self.inner.lock().unwrap();
        let Some(body) = inner.pending.pop_front() else {
            return Ok(None);
        };
        let receipt = Uuid::new_v4().to_string();
        inner.in_flight.insert(receipt.clone(), body.clone());
        Ok(Some(QueueDelivery { body, receipt }))
    }

    async fn delete(&self, receipt: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.in_flight.remove(receipt).is_none() {
            return Err(Error::Queue(QueueError::Delete(format!(
                "unknown receipt: {}",
                receipt
            ))));
        }
        inner.deleted += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn receive_moves_a_message_in_flight() {
        let queue = MemoryQueue::new();
        queue.push("payload");

        let delivery = queue.receive().await.unwrap().unwrap();
        assert_eq!(delivery.body, "payload");
        assert_eq!(queue.pending_len(), 0);
        assert_eq!(queue.in_flight_len(), 1);
    }

    #[tokio::test]
    async fn delete_acknowledges_exactly_once() {
        let queue = MemoryQueue::new();
        queue.push("payload");

        let delivery = queue.receive().await.unwrap().unwrap();
        queue.delete(&delivery.receipt).await.unwrap();
        assert_eq!(queue.deleted_count(), 1);
        assert_eq!(queue.in_flight_len(), 0);

        // A second delete of the same receipt is an error, not a no-op.
        assert!(queue.delete(&delivery.receipt).await.is_err());
        assert_eq!(queue.deleted_count(), 1);
    }

    #[tokio::test]
    async fn empty_queue_receives_nothing() {
        let queue = MemoryQueue::new();
        assert!(queue.receive().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn redeliver_requeues_unacknowledged_messages() {
        let queue = MemoryQueue::new();
        queue.push("payload");

        let _delivery = queue.receive().await.unwrap().unwrap();
        queue.redeliver();

        assert_eq!(queue.pending_len(), 1);
        assert_eq!(queue.in_flight_len(), 0);

        let again = queue.receive().await.unwrap().unwrap();
        assert_eq!(again.body, "payload");
    }
}
