mod error;
mod key;
mod traits;

pub mod filesystem;
#[cfg(feature = "object-storage")]
pub mod s3;

use std::sync::Arc;

pub use error::StorageError;
pub use key::ObjectKey;
pub use traits::{BlobStore, BoxReader};

use crate::config::{StorageBackendKind, StorageConfig};

/// Open the blob store selected by `config.backend`.
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn BlobStore>, StorageError> {
    match config.backend {
        StorageBackendKind::Filesystem => {
            let store = filesystem::FilesystemBlobStore::new(
                config.root.clone(),
                config.public_base_url.clone(),
                config.max_blob_size,
            )
            .await?;
            tracing::info!(root = %config.root.display(), "Using filesystem blob store");
            Ok(Arc::new(store))
        }
        #[cfg(feature = "object-storage")]
        StorageBackendKind::S3 => {
            let s3_config = config.s3.as_ref().ok_or_else(|| {
                StorageError::Backend("storage.backend = \"s3\" requires a [storage.s3] section".into())
            })?;
            let store = s3::S3BlobStore::new(
                s3_config,
                config.public_base_url.clone(),
                config.max_blob_size,
            )?;
            tracing::info!(bucket = %s3_config.bucket, "Using S3 blob store");
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "object-storage"))]
        StorageBackendKind::S3 => Err(StorageError::Backend(
            "built without the object-storage feature".into(),
        )),
    }
}
