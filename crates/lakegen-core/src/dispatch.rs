//! Bounded parallel dispatch of independent copy operations.

use std::sync::Arc;

use futures::StreamExt;
use tracing::{info, warn};

use crate::copy::copy_item;
use crate::listing::ObjectDescriptor;
use crate::storage::StorageBackend;

/// One unit of copy work. Self-contained and consumed exactly once; lives
/// only for the dispatch cycle that created it.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub descriptor: ObjectDescriptor,
    pub source_container: String,
    pub destination_container: String,
}

/// A copy that failed within a dispatch batch.
#[derive(Debug)]
pub struct CopyFailure {
    pub key: String,
    pub message: String,
}

/// Aggregate outcome of one dispatch batch.
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<CopyFailure>,
}

impl DispatchReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Fans copy operations out across a bounded worker pool.
///
/// Items are independent: no ordering is guaranteed between completions and
/// a failed item never aborts its siblings. Every item is attempted and the
/// pool is drained before the report is returned.
pub struct Dispatcher {
    storage: Arc<dyn StorageBackend>,
    workers: usize,
}

impl Dispatcher {
    pub fn new(storage: Arc<dyn StorageBackend>, workers: usize) -> Self {
        Self {
            storage,
            workers: workers.max(1),
        }
    }

    pub async fn dispatch(&self, items: Vec<WorkItem>) -> DispatchReport {
        let mut report = DispatchReport {
            attempted: items.len(),
            ..Default::default()
        };
        info!(
            "Dispatching {} copy operations across {} workers",
            report.attempted, self.workers
        );

        let storage = self.storage.clone();
        let mut outcomes = futures::stream::iter(items)
            .map(|item| {
                let storage = storage.clone();
                async move {
                    let outcome = copy_item(storage.as_ref(), &item).await;
                    (item, outcome)
                }
            })
            .buffer_unordered(self.workers);

        while let Some((item, outcome)) = outcomes.next().await {
            match outcome {
                Ok(()) => report.succeeded += 1,
                Err(e) => {
                    warn!("Copy of '{}' failed: {}", item.descriptor.name, e);
                    report.failures.push(CopyFailure {
                        key: item.descriptor.name,
                        message: e.to_string(),
                    });
                }
            }
        }

        report
    }
}
