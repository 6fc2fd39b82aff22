//! Source container listing.

use tracing::{debug, info};

use crate::storage::StorageBackend;
use crate::{Error, Result};

/// Lightweight descriptor for one stored object: key and size in bytes.
///
/// Valid only for the listing snapshot it was read from; a later listing of
/// the same container may return a different set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDescriptor {
    /// Object key, unique within a listing snapshot
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

/// Fetch the current object set of `container`.
///
/// Storage failures surface as [`Error::ListingUnavailable`]. An empty
/// container yields an empty listing; whether that is usable is decided by
/// the resampler, not here.
pub async fn read_listing(
    storage: &dyn StorageBackend,
    container: &str,
) -> Result<Vec<ObjectDescriptor>> {
    let listing = match storage.list(container).await {
        Ok(listing) => listing,
        Err(Error::Storage(e)) => {
            return Err(Error::ListingUnavailable {
                container: container.to_string(),
                message: e.to_string(),
            })
        }
        Err(e) => return Err(e),
    };

    info!(
        "Listed {} objects in container '{}'",
        listing.len(),
        container
    );
    debug!("Listing: {:?}", listing);
    Ok(listing)
}
