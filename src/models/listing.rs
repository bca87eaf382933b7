//! Job listing data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job listing extracted from the employment portal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Listing {
    /// Listing title
    pub title: String,

    /// Hiring organization
    pub employer: String,

    /// Listing location
    pub location: String,

    /// Full URL to the listing
    pub link: String,

    /// When this listing was first observed
    pub detected_at: DateTime<Utc>,

    /// Identity hash of the normalized title and employer
    pub fingerprint: String,
}

impl Listing {
    /// One-line rendering for console summaries.
    pub fn summary_line(&self) -> String {
        format!("{} | {} | {}", self.title, self.employer, self.location)
    }
}
