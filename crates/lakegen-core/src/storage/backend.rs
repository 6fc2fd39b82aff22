//! Storage backend trait definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::listing::ObjectDescriptor;
use crate::Result;

/// Trait for container-addressed object storage.
///
/// Containers are bucket-like namespaces managed by the same backend, so a
/// copy between containers is performed server-side; object bytes never
/// stream through the calling process.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// List every object in a container as name/size descriptors.
    async fn list(&self, container: &str) -> Result<Vec<ObjectDescriptor>>;

    /// Server-side copy of one object between containers.
    async fn copy(
        &self,
        src_container: &str,
        src_key: &str,
        dest_container: &str,
        dest_key: &str,
    ) -> Result<()>;

    /// Write an object, used to seed source data.
    async fn put(&self, container: &str, key: &str, data: Bytes) -> Result<()>;
}
