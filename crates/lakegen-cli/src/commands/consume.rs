use std::sync::Arc;

use anyhow::Result;
use lakegen_core::queue::SqsBackend;
use lakegen_core::storage::{create_backend, StorageBackendConfig};
use lakegen_core::{GenerateEngine, QueueTrigger};
use tracing::info;

pub async fn run(
    queue_url: &str,
    storage_url: &str,
    workers: Option<usize>,
    wait_secs: i32,
) -> Result<()> {
    let config = StorageBackendConfig::from_url(storage_url)?;
    let storage = create_backend(&config).await?;
    let queue = Arc::new(SqsBackend::from_env(queue_url.to_string(), wait_secs).await);

    let trigger = QueueTrigger::new(queue, GenerateEngine::new(storage, workers));

    // One receive per invocation; a failed run leaves the message for
    // redelivery and exits non-zero.
    info!("Receiving from queue: {}", queue_url);
    match trigger.run_once().await? {
        Some(report) => {
            info!("Processed delivery: {} objects copied", report.succeeded);
        }
        None => {
            info!("Queue empty, nothing to do");
        }
    }

    Ok(())
}
