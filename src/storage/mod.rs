//! State snapshot persistence.
//!
//! One flat JSON array of listings from the previous run. Loaded once at
//! startup, replaced wholesale at the end of a successful run; there is no
//! merge and no history.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Listing;

// Re-export for convenience
pub use local::LocalStateStore;

/// Trait for state snapshot backends.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the previous run's listings.
    ///
    /// A missing or unreadable snapshot degrades to an empty set; this
    /// method never fails. The resulting mass "everything is new" report on
    /// the next diff is the documented bootstrap behavior.
    async fn load(&self) -> Vec<Listing>;

    /// Replace the snapshot with the current run's full listing set.
    async fn save(&self, listings: &[Listing]) -> Result<()>;
}
