use axum::Json;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Duration;
use common::storage::{BoxReader, ObjectKey, StorageError};
use futures::TryStreamExt;
use tokio_util::io::{ReaderStream, StreamReader};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::MaybeAdmin;
use crate::extractors::json::AppJson;
use crate::models::upload::{BlobUploadQuery, BlobUploadResponse, UploadRequest, UploadResponse};
use crate::state::AppState;
use crate::utils::jwt;
use crate::utils::upload::plan_upload;

#[utoipa::path(
    post,
    path = "/upload",
    tag = "Uploads",
    operation_id = "handleUpload",
    summary = "Broker a client upload",
    description = "`blob.generate-client-token` issues a short-lived token and an upload URL for \
        one file; it requires an admin session. `blob.upload-completed` confirms an upload made \
        with such a token. Any authorization or storage failure is reported as `UPLOAD_DENIED`.",
    request_body = UploadRequest,
    responses(
        (status = 200, description = "Token issued or completion acknowledged", body = UploadResponse),
        (status = 400, description = "Refused (UPLOAD_DENIED) or malformed body (VALIDATION_ERROR)", body = ErrorBody),
    ),
    security((), ("jwt" = [])),
)]
#[instrument(skip(state, admin, request))]
pub async fn handle_upload(
    State(state): State<AppState>,
    MaybeAdmin(admin): MaybeAdmin,
    AppJson(request): AppJson<UploadRequest>,
) -> Result<Json<UploadResponse>, AppError> {
    match request {
        UploadRequest::GenerateClientToken {
            pathname,
            content_type,
        } => {
            let admin = admin.ok_or_else(|| AppError::UploadDenied("Not authenticated".into()))?;

            let plan = plan_upload(&pathname, content_type.as_deref())
                .map_err(|e| AppError::UploadDenied(e.to_string()))?;

            let ttl = Duration::minutes(state.config.auth.upload_token_ttl_minutes);
            let (client_token, expires_at) = jwt::sign_upload(
                admin.user_id,
                plan.key.as_str(),
                &plan.content_type,
                ttl,
                &state.config.auth.jwt_secret,
            )
            .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

            let presigned = state
                .blob_store
                .presign_put(
                    &plan.key,
                    &plan.content_type,
                    ttl.to_std().unwrap_or_default(),
                )
                .await
                .map_err(|e| AppError::UploadDenied(e.to_string()))?;
            let upload_url = presigned.unwrap_or_else(|| {
                format!(
                    "{}/blobs/{}?token={}",
                    state.config.server.public_url.trim_end_matches('/'),
                    plan.key,
                    client_token
                )
            });

            tracing::info!(
                user_id = admin.user_id,
                pathname = %plan.key,
                content_type = %plan.content_type,
                "Issued client upload token"
            );

            Ok(Json(UploadResponse::ClientToken {
                url: state.blob_store.public_url(&plan.key),
                pathname: plan.key.to_string(),
                content_type: plan.content_type,
                client_token,
                upload_url,
                expires_at,
            }))
        }
        UploadRequest::UploadCompleted {
            pathname,
            client_token,
        } => {
            let claims = jwt::verify_upload(&client_token, &state.config.auth.jwt_secret)
                .map_err(|_| AppError::UploadDenied("Invalid client token".into()))?;
            if claims.pathname != pathname {
                return Err(AppError::UploadDenied(
                    "Client token does not match pathname".into(),
                ));
            }

            tracing::info!(user_id = claims.uid, %pathname, "Upload completed");

            Ok(Json(UploadResponse::UploadCompleted {
                response: "ok".into(),
            }))
        }
    }
}

/// Accept the bytes of a brokered upload (filesystem backend).
#[instrument(skip(state, query, headers, body))]
pub async fn put_blob(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<BlobUploadQuery>,
    headers: HeaderMap,
    body: Body,
) -> Result<impl IntoResponse, AppError> {
    let token = query.token.ok_or(AppError::TokenMissing)?;
    let claims = jwt::verify_upload(&token, &state.config.auth.jwt_secret)
        .map_err(|_| AppError::TokenInvalid)?;

    let key = ObjectKey::parse(&key)?;
    if claims.pathname != key.as_str() {
        return Err(AppError::TokenInvalid);
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_ascii_lowercase())
        .unwrap_or_default();
    if content_type != claims.content_type {
        return Err(AppError::Validation(format!(
            "Content-Type must be '{}'",
            claims.content_type
        )));
    }

    // Refuse oversized bodies before any byte is written.
    let limit = state.blob_store.max_size();
    if let Some(actual) = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|len| *len > limit)
    {
        return Err(StorageError::SizeLimitExceeded { actual, limit }.into());
    }

    let stream = body.into_data_stream().map_err(std::io::Error::other);
    let reader: BoxReader = Box::new(StreamReader::new(stream));
    let size = state
        .blob_store
        .put_stream(&key, &content_type, reader)
        .await?;

    tracing::info!(pathname = %key, size, "Stored uploaded blob");

    Ok((
        StatusCode::CREATED,
        Json(BlobUploadResponse {
            url: state.blob_store.public_url(&key),
            pathname: key.to_string(),
            content_type,
            size,
        }),
    ))
}

/// Serve a stored object. Keys never get overwritten, so the key doubles as the ETag.
#[instrument(skip(state, headers))]
pub async fn get_blob(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let key = ObjectKey::parse(&key).map_err(|_| AppError::NotFound("Object not found".into()))?;

    let etag_value = format!("\"{}\"", key);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let reader = state.blob_store.get_stream(&key).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    let content_type = mime_guess::from_path(key.as_str())
        .first_or_octet_stream()
        .to_string();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(key.file_name()),
        )
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))?;

    Ok(response)
}

/// Build a safe `Content-Disposition` header value.
fn content_disposition_value(filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let ascii_name = if ascii_safe.is_empty() {
        "download".to_string()
    } else {
        ascii_safe
    };

    // RFC 5987 percent-encoding for filename*.
    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                String::from(b as char)
            }
            _ => format!("%{b:02X}"),
        })
        .collect();

    format!("inline; filename=\"{ascii_name}\"; filename*=UTF-8''{encoded}")
}
