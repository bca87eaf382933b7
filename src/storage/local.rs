//! Local filesystem state snapshot.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::Listing;
use crate::storage::StateStore;

/// JSON file backend for the listing snapshot.
#[derive(Clone)]
pub struct LocalStateStore {
    path: PathBuf,
}

impl LocalStateStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read bytes, returning None if the file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl StateStore for LocalStateStore {
    async fn load(&self) -> Vec<Listing> {
        let bytes = match self.read_bytes().await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                log::info!("No prior state at {:?}; starting fresh", self.path);
                return Vec::new();
            }
            Err(e) => {
                log::warn!("Failed to read state from {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(listings) => listings,
            Err(e) => {
                log::warn!(
                    "State file {:?} is not valid JSON ({}); treating as empty",
                    self.path,
                    e
                );
                Vec::new()
            }
        }
    }

    async fn save(&self, listings: &[Listing]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(listings)?;
        self.write_bytes(&bytes).await?;
        log::info!("State saved: {} listings", listings.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn make_listing(title: &str) -> Listing {
        Listing {
            title: title.to_string(),
            employer: "Gobierno de Santa Fe".to_string(),
            location: "Santa Fe".to_string(),
            link: format!("https://example.com/{}", title),
            detected_at: Utc::now(),
            fingerprint: crate::pipeline::fingerprint(title, "Gobierno de Santa Fe"),
        }
    }

    fn store_in(tmp: &TempDir) -> LocalStateStore {
        LocalStateStore::new(tmp.path().join("empleos_anteriores.json"))
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(store_in(&tmp).load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        tokio::fs::write(store.path(), b"{not json]").await.unwrap();

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let listings = vec![make_listing("Chofer"), make_listing("Cocinero")];
        store.save(&listings).await.unwrap();

        assert_eq!(store.load().await, listings);
    }

    #[tokio::test]
    async fn test_save_overwrites_wholesale() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store
            .save(&[make_listing("Vieja"), make_listing("Anterior")])
            .await
            .unwrap();
        store.save(&[make_listing("Nueva")]).await.unwrap();

        let loaded = store.load().await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Nueva");
    }

    #[tokio::test]
    async fn test_snapshot_is_a_plain_json_array() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store.save(&[make_listing("Chofer")]).await.unwrap();

        let raw = tokio::fs::read_to_string(store.path()).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
        // Human-readably indented
        assert!(raw.contains('\n'));
    }
}
