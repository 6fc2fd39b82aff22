//! Batch resampling: fit a listing to an exact target count.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::listing::ObjectDescriptor;
use crate::{Error, Result};

/// Resize `listing` to exactly `target_count` entries and randomize order.
///
/// A deficit is filled by drawing uniformly at random, with replacement,
/// from the original listing; draws are independent and index the snapshot
/// only, so earlier duplicates never join the pool. A surplus is trimmed
/// from the end of the listing in reader order. The fixed-length result is
/// then shuffled uniformly.
///
/// `target_count == 0` yields an empty batch regardless of the listing; an
/// empty listing with a nonzero target fails with
/// [`Error::InsufficientSourceData`].
pub fn resample(
    mut listing: Vec<ObjectDescriptor>,
    target_count: usize,
) -> Result<Vec<ObjectDescriptor>> {
    if target_count == 0 {
        return Ok(Vec::new());
    }
    if listing.is_empty() {
        return Err(Error::InsufficientSourceData {
            requested: target_count,
        });
    }

    let mut rng = rand::thread_rng();
    let snapshot_len = listing.len();
    if target_count > snapshot_len {
        for _ in 0..(target_count - snapshot_len) {
            let pick = listing[rng.gen_range(0..snapshot_len)].clone();
            listing.push(pick);
        }
    } else {
        listing.truncate(target_count);
    }

    listing.shuffle(&mut rng);
    Ok(listing)
}
