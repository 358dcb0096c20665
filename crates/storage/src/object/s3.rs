//! S3-backed object store.

use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;

use fd_domain::error::{Error, Result};

use super::ObjectStore;

#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    /// Inner S3 client
    inner: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(inner: aws_sdk_s3::Client, bucket: &str) -> Self {
        Self {
            inner,
            bucket: bucket.to_string(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

fn to_storage(e: impl std::fmt::Display) -> Error {
    Error::Storage(e.to_string())
}

#[async_trait::async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        self.inner
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(to_storage)?;
        Ok(())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String> {
        let presigning = PresigningConfig::expires_in(expires_in).map_err(to_storage)?;
        let presigned = self
            .inner
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(to_storage)?;
        Ok(presigned.uri().to_string())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.inner
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(to_storage)?;
        Ok(())
    }
}
