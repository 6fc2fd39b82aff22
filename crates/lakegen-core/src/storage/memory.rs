//! In-memory storage backend for testing.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};

use super::StorageBackend;
use crate::error::StorageError;
use crate::listing::ObjectDescriptor;
use crate::{Error, Result};

/// In-memory storage backend using object_store.
///
/// Containers are modelled as the first path segment of one shared store,
/// so cross-container copies stay within a single `InMemory` instance.
/// Primarily useful for tests; nothing persists between runs.
pub struct MemoryBackend {
    store: Arc<InMemory>,
}

impl MemoryBackend {
    /// Create a new in-memory storage backend
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemory::new()),
        }
    }

    fn object_path(container: &str, key: &str) -> Path {
        Path::from(format!("{}/{}", container, key))
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn list(&self, container: &str) -> Result<Vec<ObjectDescriptor>> {
        let prefix = Path::from(container);
        let container_prefix = format!("{}/", container);

        let mut listing = Vec::new();
        let mut stream = self.store.list(Some(&prefix));
        while let Some(item) = stream.next().await {
            let meta = item.map_err(|e| {
                Error::Storage(StorageError::Backend(format!("Memory LIST failed: {}", e)))
            })?;
            let location = meta.location.to_string();
            let name = location
                .strip_prefix(&container_prefix)
                .unwrap_or(&location)
                .to_string();
            listing.push(ObjectDescriptor {
                name,
                size: meta.size as u64,
            });
        }

        Ok(listing)
    }

    async fn copy(
        &self,
        src_container: &str,
        src_key: &str,
        dest_container: &str,
        dest_key: &str,
    ) -> Result<()> {
        self.store
            .copy(
                &Self::object_path(src_container, src_key),
                &Self::object_path(dest_container, dest_key),
            )
            .await
            .map_err(|e| match e {
                object_store::Error::NotFound { .. } => Error::Storage(StorageError::NotFound(
                    format!("{}/{}", src_container, src_key),
                )),
                _ => Error::Storage(StorageError::Backend(format!("Memory COPY failed: {}", e))),
            })?;

        Ok(())
    }

    async fn put(&self, container: &str, key: &str, data: Bytes) -> Result<()> {
        self.store
            .put(
                &Self::object_path(container, key),
                PutPayload::from_bytes(data),
            )
            .await
            .map_err(|e| {
                Error::Storage(StorageError::Backend(format!("Memory PUT failed: {}", e)))
            })?;

        Ok(())
    }
}
