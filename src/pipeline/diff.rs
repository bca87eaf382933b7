//! New-listing detection.
//!
//! Compares the current fetch against the previous run's snapshot to find
//! listings whose fingerprint has not been seen before. Removals are not
//! tracked; a listing disappearing from the portal simply drops out of the
//! next snapshot.

use std::collections::HashSet;

use crate::models::Listing;

/// Return the subset of `current` absent from `previous`.
///
/// Membership is decided purely by fingerprint. The relative order of
/// `current` is preserved. An empty `previous` (first run, or a lost state
/// file) reports everything as new; that is the bootstrap case, not an
/// error.
pub fn detect_new(current: &[Listing], previous: &[Listing]) -> Vec<Listing> {
    let known: HashSet<&str> = previous.iter().map(|l| l.fingerprint.as_str()).collect();

    current
        .iter()
        .filter(|listing| !known.contains(listing.fingerprint.as_str()))
        .cloned()
        .collect()
}
