use std::time::Duration;

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};
use tokio::io::AsyncReadExt;

use super::error::StorageError;
use super::key::ObjectKey;
use super::traits::{BlobStore, BoxReader};
use crate::config::S3Config;

/// S3-compatible blob store (AWS S3, MinIO, R2).
///
/// Clients upload straight to the bucket through presigned `PUT` URLs.
pub struct S3BlobStore {
    bucket: Box<Bucket>,
    public_base_url: String,
    max_size: u64,
}

impl S3BlobStore {
    pub fn new(
        config: &S3Config,
        public_base_url: String,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse::<Region>()
                .map_err(|e| StorageError::Backend(format!("invalid region: {e}")))?,
        };

        let credentials = Credentials::new(
            config.access_key.as_deref(),
            config.secret_key.as_deref(),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Backend(format!("invalid credentials: {e}")))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials).map_err(backend)?;
        if config.path_style {
            bucket = bucket.with_path_style();
        }

        Ok(Self {
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            max_size,
        })
    }
}

fn backend(e: S3Error) -> StorageError {
    StorageError::Backend(e.to_string())
}

fn is_not_found(e: &S3Error) -> bool {
    matches!(e, S3Error::HttpFailWithBody(404, _))
}

fn check_status(key: &ObjectKey, status: u16) -> Result<(), StorageError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(StorageError::NotFound(key.to_string())),
        other => Err(StorageError::Backend(format!(
            "unexpected status {other} for {key}"
        ))),
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put_stream(
        &self,
        key: &ObjectKey,
        content_type: &str,
        reader: BoxReader,
    ) -> Result<u64, StorageError> {
        if self.exists(key).await? {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }

        let mut data = Vec::new();
        reader
            .take(self.max_size + 1)
            .read_to_end(&mut data)
            .await?;
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let response = self
            .bucket
            .put_object_with_content_type(key.as_str(), &data, content_type)
            .await
            .map_err(backend)?;
        check_status(key, response.status_code())?;

        Ok(data.len() as u64)
    }

    async fn get_stream(&self, key: &ObjectKey) -> Result<BoxReader, StorageError> {
        let response = match self.bucket.get_object(key.as_str()).await {
            Ok(response) => response,
            Err(e) if is_not_found(&e) => return Err(StorageError::NotFound(key.to_string())),
            Err(e) => return Err(backend(e)),
        };
        check_status(key, response.status_code())?;
        Ok(Box::new(std::io::Cursor::new(response.bytes().to_vec())))
    }

    async fn exists(&self, key: &ObjectKey) -> Result<bool, StorageError> {
        match self.bucket.head_object(key.as_str()).await {
            Ok((_, 404)) => Ok(false),
            Ok((_, status)) => check_status(key, status).map(|_| true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(backend(e)),
        }
    }

    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError> {
        if !self.exists(key).await? {
            return Ok(false);
        }
        let response = self
            .bucket
            .delete_object(key.as_str())
            .await
            .map_err(backend)?;
        check_status(key, response.status_code())?;
        Ok(true)
    }

    fn public_url(&self, key: &ObjectKey) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    async fn presign_put(
        &self,
        key: &ObjectKey,
        _content_type: &str,
        expires_in: Duration,
    ) -> Result<Option<String>, StorageError> {
        let secs = u32::try_from(expires_in.as_secs()).unwrap_or(u32::MAX);
        let url = self
            .bucket
            .presign_put(key.as_str(), secs, None, None)
            .await
            .map_err(backend)?;
        Ok(Some(url))
    }

    fn max_size(&self) -> u64 {
        self.max_size
    }
}
