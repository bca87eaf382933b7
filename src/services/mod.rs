//! I/O-facing services: listing extraction and notification delivery.

pub mod extract;
pub mod notify;

pub use extract::{ContainerOutcome, ListingExtractor, SkipReason};
pub use notify::{NotifyStatus, TelegramNotifier};
