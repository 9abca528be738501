//! In-memory blob storage

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use vidlist_core::{BlobStore, Result};

/// Blob storage kept in process memory
///
/// Nothing survives the process; used for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `value` under `key`
    pub fn seeded(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut blobs = HashMap::new();
        blobs.insert(key.into(), value.into());
        Self {
            blobs: RwLock::new(blobs),
        }
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.blobs
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
