use std::path::PathBuf;

use serde::Deserialize;

/// Which blob store backs uploaded media.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    #[default]
    Filesystem,
    S3,
}

/// Blob storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Backend selector. Default: "filesystem".
    #[serde(default)]
    pub backend: StorageBackendKind,
    /// Root directory for the filesystem backend. Default: "./data/blobs".
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Public prefix that object keys are appended to.
    /// Default: "http://127.0.0.1:3000/blobs".
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Maximum object size in bytes. Default: 50 MiB.
    #[serde(default = "default_max_blob_size")]
    pub max_blob_size: u64,
    /// Settings for the S3 backend; required when `backend = "s3"`.
    #[serde(default)]
    pub s3: Option<S3Config>,
}

/// S3-compatible object storage settings.
#[derive(Debug, Deserialize, Clone)]
pub struct S3Config {
    pub bucket: String,
    /// Default: "us-east-1".
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint for MinIO, R2 and friends.
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Use path-style addressing. Default: false.
    #[serde(default)]
    pub path_style: bool,
}

fn default_root() -> PathBuf {
    PathBuf::from("./data/blobs")
}
fn default_public_base_url() -> String {
    "http://127.0.0.1:3000/blobs".into()
}
fn default_max_blob_size() -> u64 {
    50 * 1024 * 1024
}
fn default_region() -> String {
    "us-east-1".into()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::default(),
            root: default_root(),
            public_base_url: default_public_base_url(),
            max_blob_size: default_max_blob_size(),
            s3: None,
        }
    }
}
