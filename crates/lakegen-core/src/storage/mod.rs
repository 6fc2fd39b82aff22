//! Storage backend abstraction and implementations.
//!
//! This module provides a unified interface for the container operations
//! the pipeline needs (list, server-side copy, put) across:
//!
//! - **S3**: AWS S3 and S3-compatible services (MinIO, Ceph RGW, etc.)
//! - **Filesystem**: Local filesystem storage, containers as directories
//! - **Memory**: In-memory storage (for testing)

mod backend;
mod config;
mod filesystem;
mod memory;
mod s3;

pub use backend::StorageBackend;
pub use config::StorageBackendConfig;
pub use filesystem::FilesystemBackend;
pub use memory::MemoryBackend;
pub use s3::S3Backend;

use std::sync::Arc;

use crate::Result;

/// Create a storage backend from configuration.
pub async fn create_backend(config: &StorageBackendConfig) -> Result<Arc<dyn StorageBackend>> {
    match config {
        StorageBackendConfig::S3 { region, endpoint } => Ok(Arc::new(
            S3Backend::from_env(region.clone(), endpoint.clone()).await,
        )),
        StorageBackendConfig::Filesystem { path } => {
            Ok(Arc::new(FilesystemBackend::new(path.clone())?))
        }
        StorageBackendConfig::Memory => Ok(Arc::new(MemoryBackend::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn create_memory_backend_supports_the_pipeline_operations() {
        let config = StorageBackendConfig::Memory;
        let backend = create_backend(&config).await.unwrap();

        backend.put("seed", "data.txt", Bytes::from("hello")).await.unwrap();
        let listing = backend.list("seed").await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].name, "data.txt");
        assert_eq!(listing[0].size, 5);

        backend.copy("seed", "data.txt", "out", "copy.txt").await.unwrap();
        assert_eq!(backend.list("out").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_filesystem_backend() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = StorageBackendConfig::Filesystem {
            path: temp_dir.path().to_path_buf(),
        };
        let backend = create_backend(&config).await.unwrap();

        backend.put("seed", "data.txt", Bytes::from("hello")).await.unwrap();
        assert_eq!(backend.list("seed").await.unwrap().len(), 1);
    }
}
