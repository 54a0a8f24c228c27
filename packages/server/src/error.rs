use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use sea_orm::DbErr;
use serde::Serialize;

/// Structured error response returned by all JSON endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `TOKEN_MISSING`,
    /// `TOKEN_INVALID`, `INVALID_CREDENTIALS`, `NOT_FOUND`, `CONFLICT`,
    /// `UPLOAD_DENIED`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Query parameter is required")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    TokenMissing,
    TokenInvalid,
    InvalidCredentials,
    NotFound(String),
    Conflict(String),
    /// The upload broker refused to issue or confirm a client token.
    UploadDenied(String),
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::UploadDenied(_) => StatusCode::BAD_REQUEST,
            AppError::TokenMissing | AppError::TokenInvalid | AppError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub(crate) fn into_body(self) -> (StatusCode, ErrorBody) {
        let status = self.status();
        let body = match self {
            AppError::Validation(msg) => ErrorBody {
                code: "VALIDATION_ERROR",
                message: msg,
            },
            AppError::TokenMissing => ErrorBody {
                code: "TOKEN_MISSING",
                message: "Authentication required".into(),
            },
            AppError::TokenInvalid => ErrorBody {
                code: "TOKEN_INVALID",
                message: "Invalid or expired token".into(),
            },
            AppError::InvalidCredentials => ErrorBody {
                code: "INVALID_CREDENTIALS",
                message: "Invalid login credentials".into(),
            },
            AppError::NotFound(msg) => ErrorBody {
                code: "NOT_FOUND",
                message: msg,
            },
            AppError::Conflict(msg) => ErrorBody {
                code: "CONFLICT",
                message: msg,
            },
            AppError::UploadDenied(msg) => {
                tracing::warn!("Upload denied: {}", msg);
                ErrorBody {
                    code: "UPLOAD_DENIED",
                    message: msg,
                }
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorBody {
                    code: "INTERNAL_ERROR",
                    message: "An unexpected error occurred".into(),
                }
            }
        };
        (status, body)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.into_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::NotFound(format!("Object '{key}' not found")),
            StorageError::AlreadyExists(key) => {
                AppError::Conflict(format!("Object '{key}' already exists"))
            }
            StorageError::InvalidKey(msg) => AppError::Validation(msg),
            StorageError::SizeLimitExceeded { limit, .. } => {
                AppError::Validation(format!("File exceeds maximum size of {limit} bytes"))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        AppError::Internal(format!("Template error: {err:?}"))
    }
}
