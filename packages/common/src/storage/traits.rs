use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;
use super::key::ObjectKey;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Key-addressed public object storage.
///
/// Every stored object is reachable at [`BlobStore::public_url`]. Writes never
/// replace an existing object.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under `key`.
    async fn put(
        &self,
        key: &ObjectKey,
        content_type: &str,
        data: &[u8],
    ) -> Result<u64, StorageError> {
        let reader: BoxReader = Box::new(Cursor::new(data.to_vec()));
        self.put_stream(key, content_type, reader).await
    }

    /// Store data from an async reader under `key`, returning the byte count.
    async fn put_stream(
        &self,
        key: &ObjectKey,
        content_type: &str,
        reader: BoxReader,
    ) -> Result<u64, StorageError>;

    /// Retrieve all bytes of an object.
    async fn get(&self, key: &ObjectKey) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.get_stream(key).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Retrieve an object as a streaming async reader.
    async fn get_stream(&self, key: &ObjectKey) -> Result<BoxReader, StorageError>;

    /// Check whether an object exists.
    async fn exists(&self, key: &ObjectKey) -> Result<bool, StorageError>;

    /// Delete an object.
    ///
    /// Returns `true` if the object was deleted, `false` if it did not exist.
    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError>;

    /// Public URL under which the object is served.
    fn public_url(&self, key: &ObjectKey) -> String;

    /// Presigned URL a client can `PUT` the object to directly.
    ///
    /// `Ok(None)` means the backend has no native direct-upload flow and the
    /// application must accept the upload itself.
    async fn presign_put(
        &self,
        key: &ObjectKey,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<Option<String>, StorageError>;

    /// Largest object accepted, in bytes.
    fn max_size(&self) -> u64;
}
