use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};

use super::error::StorageError;
use super::key::ObjectKey;
use super::traits::{BlobStore, BoxReader};

/// Filesystem-backed blob store.
///
/// Objects live at `{base_path}/{key}` and are served by the application
/// under `public_base_url`.
pub struct FilesystemBlobStore {
    base_path: PathBuf,
    public_base_url: String,
    max_size: u64,
}

impl FilesystemBlobStore {
    /// Create a new filesystem blob store.
    pub async fn new(
        base_path: PathBuf,
        public_base_url: String,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            max_size,
        })
    }

    fn object_path(&self, key: &ObjectKey) -> PathBuf {
        self.base_path.join(key.as_str())
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn put_stream(
        &self,
        key: &ObjectKey,
        _content_type: &str,
        mut reader: BoxReader,
    ) -> Result<u64, StorageError> {
        let object_path = self.object_path(key);
        if fs::try_exists(&object_path).await? {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }

        let temp_path = self.temp_path();
        let mut total_bytes: u64 = 0;

        let mut buf = vec![0u8; 64 * 1024];
        let mut temp_file = fs::File::create(&temp_path).await?;

        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }

            total_bytes += n as u64;
            if total_bytes > self.max_size {
                drop(temp_file);
                let _ = fs::remove_file(&temp_path).await;
                return Err(StorageError::SizeLimitExceeded {
                    actual: total_bytes,
                    limit: self.max_size,
                });
            }

            temp_file.write_all(&buf[..n]).await?;
        }

        temp_file.flush().await?;
        drop(temp_file);

        if let Some(parent) = object_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Linking fails if the name exists, so a concurrent writer that
        // claimed the key first is never replaced.
        let published = fs::hard_link(&temp_path, &object_path).await;
        let _ = fs::remove_file(&temp_path).await;
        match published {
            Ok(()) => Ok(total_bytes),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(StorageError::AlreadyExists(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_stream(&self, key: &ObjectKey) -> Result<BoxReader, StorageError> {
        match fs::File::open(self.object_path(key)).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, key: &ObjectKey) -> Result<bool, StorageError> {
        Ok(fs::try_exists(self.object_path(key)).await?)
    }

    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError> {
        match fs::remove_file(self.object_path(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn public_url(&self, key: &ObjectKey) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    async fn presign_put(
        &self,
        _key: &ObjectKey,
        _content_type: &str,
        _expires_in: Duration,
    ) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn max_size(&self) -> u64 {
        self.max_size
    }
}
