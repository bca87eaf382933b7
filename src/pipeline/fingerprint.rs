// src/pipeline/fingerprint.rs

//! Listing identity hashing.
//!
//! Two listings with the same title and employer are the same listing,
//! regardless of location, link, or when they were seen. Cosmetic case and
//! whitespace differences collapse to one identity.

use sha2::{Digest, Sha256};

/// Compute the identity hash for a listing.
///
/// Both fields are trimmed and lowercased, then concatenated with no
/// separator and hashed. Pure function of its inputs; stability across runs
/// is the only requirement placed on the hash.
pub fn fingerprint(title: &str, employer: &str) -> String {
    let normalized = format!(
        "{}{}",
        title.trim().to_lowercase(),
        employer.trim().to_lowercase()
    );
    hex::encode(Sha256::digest(normalized.as_bytes()))
}
