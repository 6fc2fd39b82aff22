//! Local filesystem storage backend.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use object_store::local::LocalFileSystem;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};

use super::StorageBackend;
use crate::error::StorageError;
use crate::listing::ObjectDescriptor;
use crate::{Error, Result};

/// Filesystem storage backend rooted at a base directory; containers are
/// the top-level directories below it.
pub struct FilesystemBackend {
    store: Arc<LocalFileSystem>,
}

impl FilesystemBackend {
    /// Create a filesystem backend, creating the root if needed.
    pub fn new(path: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&path).map_err(|e| {
            Error::Storage(StorageError::Backend(format!(
                "Failed to create storage root: {}",
                e
            )))
        })?;
        let store = LocalFileSystem::new_with_prefix(&path).map_err(|e| {
            Error::Storage(StorageError::Backend(format!(
                "Failed to open storage root: {}",
                e
            )))
        })?;

        Ok(Self {
            store: Arc::new(store),
        })
    }

    fn object_path(container: &str, key: &str) -> Path {
        Path::from(format!("{}/{}", container, key))
    }
}

#[async_trait]
impl StorageBackend for FilesystemBackend {
    async fn list(&self, container: &str) -> Result<Vec<ObjectDescriptor>> {
        let prefix = Path::from(container);
        let container_prefix = format!("{}/", container);

        let mut listing = Vec::new();
        let mut stream = self.store.list(Some(&prefix));
        while let Some(item) = stream.next().await {
            let meta = item.map_err(|e| {
                Error::Storage(StorageError::Backend(format!(
                    "Filesystem LIST failed: {}",
                    e
                )))
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
                _ => Error::Storage(StorageError::Backend(format!(
                    "Filesystem COPY failed: {}",
                    e
                ))),
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
                Error::Storage(StorageError::Backend(format!(
                    "Filesystem PUT failed: {}",
                    e
                )))
            })?;

        Ok(())
    }
}
