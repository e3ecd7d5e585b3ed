//! Blob persistence.
//!
//! The store is persisted as one JSON blob under a single key in an
//! opaque key-value blob store. Malformed or missing data never blocks
//! startup: loading falls back to the empty snapshot.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::PersistError;
use crate::model::Bookmark;
use crate::store::BookmarkStore;

/// Key under which the bookmark snapshot is stored.
pub const BOOKMARKS_KEY: &str = "bookmarks_v1";

/// Persisted shape: the full bookmark list plus manually declared
/// category names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    #[serde(default)]
    pub manual_categories: Vec<String>,
}

impl From<&BookmarkStore> for StoreSnapshot {
    fn from(store: &BookmarkStore) -> Self {
        Self {
            bookmarks: store.bookmarks().to_vec(),
            manual_categories: store.manual_categories().to_vec(),
        }
    }
}

impl StoreSnapshot {
    pub fn into_store(self) -> BookmarkStore {
        BookmarkStore::from_parts(self.bookmarks, self.manual_categories)
    }
}

/// Opaque key-value blob storage.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the raw blob stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Write the raw blob under `key`.
    async fn put(&self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// In-memory blob store for testing.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: tokio::sync::RwLock<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        let blobs = self.blobs.read().await;
        Ok(blobs.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), PersistError> {
        let mut blobs = self.blobs.write().await;
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed blob store: one JSON file per key under a data directory.
pub struct FileBlobStore {
    data_dir: PathBuf,
}

impl FileBlobStore {
    pub async fn new(data_dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).await?;
        debug!("FileBlobStore initialized at {:?}", data_dir);
        Ok(Self { data_dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        let path = self.key_path(key);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), PersistError> {
        fs::write(self.key_path(key), value).await?;
        Ok(())
    }
}

/// Load the persisted snapshot, falling back to the empty snapshot when
/// the blob is missing, unreadable, or malformed. Never fails startup.
pub async fn load_snapshot(blobs: &dyn BlobStore) -> StoreSnapshot {
    let raw = match blobs.get(BOOKMARKS_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return StoreSnapshot::default(),
        Err(e) => {
            warn!("Failed to read persisted bookmarks, starting empty: {}", e);
            return StoreSnapshot::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("Persisted bookmarks are malformed, starting empty: {}", e);
            StoreSnapshot::default()
        }
    }
}

/// Persist the store. Skipped while the store is empty so a fresh run
/// never clobbers an existing blob with nothing.
pub async fn save_snapshot(
    blobs: &dyn BlobStore,
    store: &BookmarkStore,
) -> Result<(), PersistError> {
    if store.is_empty() {
        return Ok(());
    }

    let snapshot = StoreSnapshot::from(store);
    let raw = serde_json::to_string(&snapshot)
        .map_err(|e| PersistError::Serialization(e.to_string()))?;
    blobs.put(BOOKMARKS_KEY, &raw).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn populated_store() -> BookmarkStore {
        let mut store = BookmarkStore::new();
        store.import(vec![
            Bookmark::new("Example", "https://example.com/", 1_700_000_000_000),
        ]);
        store.create_category("Work");
        store
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let blobs = MemoryBlobStore::new();
        let store = populated_store();

        save_snapshot(&blobs, &store).await.unwrap();
        let loaded = load_snapshot(&blobs).await.into_store();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.bookmarks()[0].url, "https://example.com/");
        assert_eq!(loaded.manual_categories(), ["Work"]);
    }

    #[tokio::test]
    async fn test_load_missing_blob_falls_back_to_empty() {
        let blobs = MemoryBlobStore::new();
        let snapshot = load_snapshot(&blobs).await;
        assert!(snapshot.bookmarks.is_empty());
        assert!(snapshot.manual_categories.is_empty());
    }

    #[tokio::test]
    async fn test_load_malformed_blob_falls_back_to_empty() {
        let blobs = MemoryBlobStore::new();
        blobs.put(BOOKMARKS_KEY, "{not json").await.unwrap();

        let snapshot = load_snapshot(&blobs).await;
        assert!(snapshot.bookmarks.is_empty());
    }

    #[tokio::test]
    async fn test_empty_store_is_not_persisted() {
        let blobs = MemoryBlobStore::new();
        save_snapshot(&blobs, &BookmarkStore::new()).await.unwrap();
        assert!(blobs.get(BOOKMARKS_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_blob_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let blobs = FileBlobStore::new(temp_dir.path()).await.unwrap();

        let store = populated_store();
        save_snapshot(&blobs, &store).await.unwrap();

        let loaded = load_snapshot(&blobs).await.into_store();
        assert_eq!(loaded.len(), 1);
    }

    #[tokio::test]
    async fn test_file_blob_store_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let blobs = FileBlobStore::new(temp_dir.path()).await.unwrap();
        assert!(blobs.get("absent").await.unwrap().is_none());
    }
}
