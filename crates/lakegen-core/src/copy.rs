//! Single-object duplication under a freshly generated destination name.

use tracing::info;
use uuid::Uuid;

use crate::dispatch::WorkItem;
use crate::storage::StorageBackend;
use crate::{Error, Result};

/// Generate a collision-resistant destination key that preserves the source
/// key's file extension. The source name itself is never reused.
pub fn destination_key(source_key: &str) -> String {
    format!("{}{}", Uuid::new_v4().simple(), extension(source_key))
}

/// Extension of the key's basename, dot included; empty when the basename
/// has none or is itself a dotfile.
fn extension(key: &str) -> &str {
    let basename = key.rsplit('/').next().unwrap_or(key);
    match basename.rfind('.') {
        Some(idx) if idx > 0 => &basename[idx..],
        _ => "",
    }
}

/// Duplicate one object server-side into the destination container.
///
/// Failure is per-item: a vanished source or an inaccessible destination
/// becomes [`Error::CopyFailed`] for this item only.
pub async fn copy_item(storage: &dyn StorageBackend, item: &WorkItem) -> Result<()> {
    let dest_key = destination_key(&item.descriptor.name);
    info!(
        "Copying '{}' from '{}' to '{}/{}'",
        item.descriptor.name, item.source_container, item.destination_container, dest_key
    );

    storage
        .copy(
            &item.source_container,
            &item.descriptor.name,
            &item.destination_container,
            &dest_key,
        )
        .await
        .map_err(|e| Error::CopyFailed {
            key: item.descriptor.name.clone(),
            message: e.to_string(),
        })
}
