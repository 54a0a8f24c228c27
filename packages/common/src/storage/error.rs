/// Errors that can occur during blob storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested object was not found.
    #[error("object not found: {0}")]
    NotFound(String),
    /// An object already exists under this key; uploads never overwrite.
    #[error("object already exists: {0}")]
    AlreadyExists(String),
    /// An I/O error occurred.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The object key is not a safe relative path.
    #[error("invalid object key: {0}")]
    InvalidKey(String),
    /// The object exceeds the configured size limit.
    #[error("object exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },
    /// The remote provider rejected or failed the request.
    #[error("storage backend error: {0}")]
    Backend(String),
}
