//! Bucket representations and the conversions between them.
//!
//! The sparse [`BucketMap`] is the canonical state. The dense views
//! produced here borrow the very sets stored in the map, so they always
//! reflect the map's current contents and can never outlive a change to it.

use crate::error::{Error, Result};
use crate::flashcard::Flashcard;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Highest bucket number a dense view can hold.
/// The sparse map itself accepts any bucket number.
pub const MAX_DENSE_BUCKET: usize = u16::MAX as usize;

/// The cards in one bucket
pub type CardSet = HashSet<Flashcard>;

/// Bucket number to card set. Keys need not be contiguous.
pub type BucketMap = BTreeMap<usize, CardSet>;

/// Lowest and highest occupied bucket indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketRange {
    pub min_bucket: usize,
    pub max_bucket: usize,
}

/// Check the shape of a bucket map: every card sits in at most one bucket.
pub fn validate(buckets: &BucketMap) -> Result<()> {
    let mut seen: HashMap<&Flashcard, usize> = HashMap::new();
    for (&bucket, set) in buckets {
        for card in set {
            if let Some(first) = seen.insert(card, bucket) {
                return Err(Error::InvalidArgument(format!(
                    "card '{}' is in both bucket {} and bucket {}",
                    card.front(),
                    first,
                    bucket
                )));
            }
        }
    }

    Ok(())
}

/// Length of the dense view of `buckets`, rejecting maps whose highest
/// bucket is above [`MAX_DENSE_BUCKET`]
fn dense_len(buckets: &BucketMap) -> Result<usize> {
    match buckets.keys().next_back() {
        None => Ok(0),
        Some(&max) if max > MAX_DENSE_BUCKET => Err(Error::InvalidArgument(format!(
            "bucket {} is too large for a dense view (max {})",
            max, MAX_DENSE_BUCKET
        ))),
        Some(&max) => Ok(max + 1),
    }
}

/// Convert a bucket map into a dense view indexed by bucket number.
///
/// The view has one slot per bucket up to the highest key, which must not
/// exceed [`MAX_DENSE_BUCKET`]. Slot `k` borrows the map's own set for
/// bucket `k`; numbers missing from the map are `None`, which is distinct
/// from a bucket that exists but is empty.
pub fn to_bucket_sets(buckets: &BucketMap) -> Result<Vec<Option<&CardSet>>> {
    validate(buckets)?;

    let mut sets = vec![None; dense_len(buckets)?];
    for (&bucket, set) in buckets {
        sets[bucket] = Some(set);
    }

    Ok(sets)
}

/// Like [`to_bucket_sets`], but every occupied slot is a mutable borrow of
/// the map's set, so edits through the view land in the map.
pub fn to_bucket_sets_mut(buckets: &mut BucketMap) -> Result<Vec<Option<&mut CardSet>>> {
    validate(buckets)?;

    let mut sets: Vec<Option<&mut CardSet>> = Vec::new();
    sets.resize_with(dense_len(buckets)?, || None);
    for (&bucket, set) in buckets.iter_mut() {
        sets[bucket] = Some(set);
    }

    Ok(sets)
}

/// Find the lowest and highest occupied slots of a dense view.
///
/// A slot counts as occupied when it holds a set, even an empty one.
/// Returns `None` when no slot is occupied.
pub fn bucket_range<S>(buckets: &[Option<S>]) -> Option<BucketRange> {
    let mut range: Option<BucketRange> = None;

    for (index, slot) in buckets.iter().enumerate() {
        if slot.is_none() {
            continue;
        }
        range = Some(match range {
            None => BucketRange {
                min_bucket: index,
                max_bucket: index,
            },
            Some(r) => BucketRange {
                min_bucket: r.min_bucket.min(index),
                max_bucket: r.max_bucket.max(index),
            },
        });
    }

    range
}
