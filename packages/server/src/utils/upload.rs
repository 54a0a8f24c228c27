use common::storage::{ObjectKey, StorageError};

/// Content types accepted for uploaded media.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "audio/mpeg",
    "audio/wav",
    "text/plain",
];

/// Reasons a flat filename is rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum FilenameError {
    Empty,
    ContainsPathSeparator,
    PathTraversal,
    NullByte,
    Hidden,
    ControlCharacter,
}

impl FilenameError {
    /// Returns a human-readable error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::ContainsPathSeparator => "Invalid filename: path separators are not allowed",
            Self::PathTraversal => "Invalid filename: '..' is not allowed",
            Self::NullByte => "Invalid filename: null bytes are not allowed",
            Self::Hidden => "Invalid filename: hidden files (starting with '.') are not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("{}", .0.message())]
    Filename(FilenameError),
    #[error("Content type '{0}' is not allowed")]
    ContentTypeNotAllowed(String),
    #[error("Could not determine the content type of '{0}'")]
    UnknownContentType(String),
    #[error(transparent)]
    Key(#[from] StorageError),
}

/// Where an upload will be written and what it is.
#[derive(Debug, Clone)]
pub struct UploadPlan {
    pub key: ObjectKey,
    pub content_type: String,
}

/// Validates a flat filename (no directory components allowed).
pub fn validate_flat_filename(filename: &str) -> Result<&str, FilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }

    if trimmed.contains('\0') {
        return Err(FilenameError::NullByte);
    }

    // Reject ASCII control characters to prevent
    // HTTP header injection (e.g. CRLF in Content-Disposition).
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(FilenameError::ControlCharacter);
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(FilenameError::ContainsPathSeparator);
    }

    if trimmed == ".." {
        return Err(FilenameError::PathTraversal);
    }

    if trimmed.starts_with('.') {
        return Err(FilenameError::Hidden);
    }

    Ok(trimmed)
}

/// Replace every character outside `[A-Za-z0-9._-]` with `-`.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Pick the content type for an upload: the declared one when present,
/// otherwise a guess from the file extension. Must be in the allow-list.
pub fn resolve_content_type(filename: &str, declared: Option<&str>) -> Result<String, UploadError> {
    let content_type = match declared
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
        .filter(|ct| !ct.is_empty() && ct != "application/octet-stream")
    {
        Some(ct) => ct,
        None => mime_guess::from_path(filename)
            .first()
            .map(|m| m.essence_str().to_string())
            .ok_or_else(|| UploadError::UnknownContentType(filename.to_string()))?,
    };

    if ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
        Ok(content_type)
    } else {
        Err(UploadError::ContentTypeNotAllowed(content_type))
    }
}

/// Validate a client-supplied file name and content type, and derive a
/// collision-free object key for it.
pub fn plan_upload(filename: &str, declared: Option<&str>) -> Result<UploadPlan, UploadError> {
    let filename = validate_flat_filename(filename).map_err(UploadError::Filename)?;
    let content_type = resolve_content_type(filename, declared)?;
    let key = ObjectKey::with_random_suffix(&sanitize_filename(filename))?;
    Ok(UploadPlan { key, content_type })
}
