use anyhow::Result;
use lakegen_core::storage::{create_backend, StorageBackendConfig};
use lakegen_core::{GenerateEngine, WorkRequest};
use tracing::info;

pub async fn run(
    src_bucket: &str,
    dest_bucket: &str,
    num_files: usize,
    size_class: &str,
    storage_url: &str,
    workers: Option<usize>,
) -> Result<()> {
    let config = StorageBackendConfig::from_url(storage_url)?;
    let storage = create_backend(&config).await?;

    let request = WorkRequest {
        source_container: src_bucket.to_string(),
        destination_container: dest_bucket.to_string(),
        target_count: num_files,
        size_class: size_class.to_string(),
    };

    let report = GenerateEngine::new(storage, workers).run(&request).await?;
    info!(
        "Batch complete: {} of {} objects copied into '{}'",
        report.succeeded, report.attempted, dest_bucket
    );

    Ok(())
}
