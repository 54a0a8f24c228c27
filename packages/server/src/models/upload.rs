use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/upload`, tagged by `type`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(tag = "type")]
pub enum UploadRequest {
    /// Ask for a short-lived token allowing the client to upload one file.
    #[serde(rename = "blob.generate-client-token")]
    GenerateClientToken {
        /// File name the client wants to upload.
        #[schema(example = "cover.png")]
        pathname: String,
        /// Declared MIME type; guessed from `pathname` when absent.
        #[schema(example = "image/png")]
        content_type: Option<String>,
    },
    /// Confirm that a client finished uploading with a previously issued token.
    #[serde(rename = "blob.upload-completed")]
    UploadCompleted {
        /// Object key returned when the token was issued.
        pathname: String,
        client_token: String,
    },
}

/// Response of `POST /api/upload`, tagged like the request.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(tag = "type")]
pub enum UploadResponse {
    #[serde(rename = "blob.generate-client-token")]
    ClientToken {
        client_token: String,
        /// Where to `PUT` the file bytes.
        upload_url: String,
        /// Final object key, with its random suffix.
        #[schema(example = "cover-Xb3kq09aZ1mPq2LcT5rdW.png")]
        pathname: String,
        /// Public URL the object will be served from.
        url: String,
        content_type: String,
        expires_at: DateTime<Utc>,
    },
    #[serde(rename = "blob.upload-completed")]
    UploadCompleted {
        #[schema(example = "ok")]
        response: String,
    },
}

/// Query string of `PUT /blobs/{key}`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct BlobUploadQuery {
    /// Client token from `blob.generate-client-token`.
    pub token: Option<String>,
}

/// Result of a direct blob upload.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct BlobUploadResponse {
    pub url: String,
    pub pathname: String,
    pub content_type: String,
    /// Stored size in bytes.
    pub size: u64,
}
