//! Queue-triggered invocation: receive, process, acknowledge.

use std::sync::Arc;

use tracing::{debug, info};

use crate::dispatch::DispatchReport;
use crate::engine::GenerateEngine;
use crate::queue::{QueueBackend, QueueDelivery};
use crate::request::WorkRequest;
use crate::Result;

/// Drives the engine from queue deliveries.
///
/// A delivery is deleted only after the full pipeline completes; any
/// failure leaves it in the queue, and the backend's redelivery policy is
/// the sole retry mechanism. A redelivered message re-runs the whole batch
/// and produces additional destination objects; that duplication is
/// accepted behavior, not an error.
pub struct QueueTrigger {
    queue: Arc<dyn QueueBackend>,
    engine: GenerateEngine,
}

impl QueueTrigger {
    pub fn new(queue: Arc<dyn QueueBackend>, engine: GenerateEngine) -> Self {
        Self { queue, engine }
    }

    /// Receive at most one delivery and process it. Returns `Ok(None)` when
    /// the queue has no message available.
    pub async fn run_once(&self) -> Result<Option<DispatchReport>> {
        let Some(delivery) = self.queue.receive().await? else {
            debug!("No deliveries available");
            return Ok(None);
        };
        let report = self.process(delivery).await?;
        Ok(Some(report))
    }

    async fn process(&self, delivery: QueueDelivery) -> Result<DispatchReport> {
        debug!("Received delivery: {:?}", delivery.body);
        let request = WorkRequest::from_form_body(&delivery.body)?;
        let report = self.engine.run(&request).await?;

        // Acknowledge strictly after dispatch completion.
        self.queue.delete(&delivery.receipt).await?;
        info!("Acknowledged delivery after {} copies", report.succeeded);
        Ok(report)
    }
}
