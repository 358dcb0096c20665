//! Object store adapter — opaque byte blobs under owner-scoped keys.

mod memory;
mod s3;

pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;

use std::time::Duration;

use fd_domain::error::Result;

/// Puts/gets/deletes opaque byte blobs under an owner-scoped key.
///
/// Implementations are explicitly constructed and injected at startup —
/// there is no ambient global client.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write the raw bytes under `key`, replacing any existing blob.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Produce a time-limited retrieval URL for the blob at `key`.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String>;

    /// Delete the blob at `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
