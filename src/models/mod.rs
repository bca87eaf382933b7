// src/models/mod.rs

//! Domain models for the monitor application.

mod config;
mod listing;
mod selectors;

// Re-export all public types
pub use config::{Config, HttpConfig, NotifierConfig, PortalConfig, StorageConfig, TelegramConfig};
pub use listing::Listing;
pub use selectors::PortalSelectors;
