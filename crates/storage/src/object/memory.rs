//! In-memory object store.
//!
//! Used for tests and for dev mode when no bucket is configured. Blobs
//! live in the process and are lost on restart.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;

use fd_domain::error::Result;

use super::ObjectStore;

#[derive(Default)]
pub struct MemoryObjectStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.read().await.get(key).cloned()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.blobs.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        self.blobs.write().await.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String> {
        // Not a real link — callers only rely on it naming the key and
        // carrying the expiry.
        Ok(format!(
            "memory://{key}?expires_in={}",
            expires_in.as_secs()
        ))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.blobs.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_delete_roundtrip() {
        let store = MemoryObjectStore::new();
        store.put("u1/w2.txt", b"bytes".to_vec()).await.unwrap();
        assert_eq!(store.get("u1/w2.txt").await, Some(b"bytes".to_vec()));

        store.delete("u1/w2.txt").await.unwrap();
        assert!(store.get("u1/w2.txt").await.is_none());
        // Deleting again is not an error.
        store.delete("u1/w2.txt").await.unwrap();
    }

    #[tokio::test]
    async fn presigned_link_names_key_and_expiry() {
        let store = MemoryObjectStore::new();
        let url = store
            .presign_get("u1/w2.txt", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(url.contains("u1/w2.txt"));
        assert!(url.contains("60"));
    }
}
