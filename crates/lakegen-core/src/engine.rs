//! Pipeline engine: listing, resampling, dispatch.

use std::sync::Arc;

use tracing::{error, info};

use crate::dispatch::{DispatchReport, Dispatcher, WorkItem};
use crate::listing::read_listing;
use crate::request::WorkRequest;
use crate::resample::resample;
use crate::storage::StorageBackend;
use crate::{Error, Result};

/// Runs one work request start to finish against a storage backend.
pub struct GenerateEngine {
    storage: Arc<dyn StorageBackend>,
    workers: usize,
}

impl GenerateEngine {
    /// Create an engine. `workers` defaults to the number of available
    /// processing units when not given.
    pub fn new(storage: Arc<dyn StorageBackend>, workers: Option<usize>) -> Self {
        let workers = workers.unwrap_or_else(num_cpus::get);
        Self { storage, workers }
    }

    /// Read the source listing, resample it to the target count, and copy
    /// the batch into the destination container.
    ///
    /// Every item is attempted before failures are reported; any failed
    /// item fails the invocation as a whole.
    pub async fn run(&self, request: &WorkRequest) -> Result<DispatchReport> {
        info!(
            "Generating {} objects (size class '{}') from '{}' into '{}'",
            request.target_count,
            request.size_class,
            request.source_container,
            request.destination_container
        );

        let listing = read_listing(self.storage.as_ref(), &request.source_container).await?;
        let batch = resample(listing, request.target_count)?;

        let items: Vec<WorkItem> = batch
            .into_iter()
            .map(|descriptor| WorkItem {
                descriptor,
                source_container: request.source_container.clone(),
                destination_container: request.destination_container.clone(),
            })
            .collect();

        let report = Dispatcher::new(self.storage.clone(), self.workers)
            .dispatch(items)
            .await;

        if report.failed() > 0 {
            for failure in &report.failures {
                error!("Copy of '{}' failed: {}", failure.key, failure.message);
            }
            return Err(Error::DispatchFailed {
                failed: report.failed(),
                attempted: report.attempted,
            });
        }

        info!(
            "Copied {} objects into '{}'",
            report.succeeded, request.destination_container
        );
        Ok(report)
    }
}
