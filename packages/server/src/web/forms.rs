//! Multipart admin forms.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::upload::plan_upload;

/// A file part of a multipart form.
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Text fields and files of a multipart form, keyed by field name.
#[derive(Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// Read every part. File inputs left empty are dropped.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid form data: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                    if file_name.is_empty() || bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Invalid form data: {e}")))?;
                    form.fields.insert(name, text);
                }
            }
        }
        Ok(form)
    }

    /// Value of a text field, empty when absent.
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

/// Store an uploaded file under a fresh key. Returns its public URL and content type.
pub async fn store_upload(state: &AppState, file: &UploadedFile) -> Result<(String, String), AppError> {
    let plan = plan_upload(&file.file_name, file.content_type.as_deref())
        .map_err(|e| AppError::Validation(e.to_string()))?;
    state
        .blob_store
        .put(&plan.key, &plan.content_type, &file.bytes)
        .await?;
    tracing::info!(key = %plan.key, size = file.bytes.len(), "Stored upload");
    Ok((state.blob_store.public_url(&plan.key), plan.content_type))
}
