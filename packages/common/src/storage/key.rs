use std::fmt;

use rand::Rng;
use rand::distr::Alphanumeric;

use super::error::StorageError;

/// Length of the random suffix appended to uploaded file names.
pub const RANDOM_SUFFIX_LEN: usize = 21;

/// A validated, relative object key (e.g. `cover-Xb3kq09aZ1mPq2LcT5rdW.png`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Validate a key received from a client or a URL path.
    pub fn parse(key: &str) -> Result<Self, StorageError> {
        let key = key.trim();

        if key.is_empty() {
            return Err(StorageError::InvalidKey("key cannot be empty".into()));
        }
        if key.len() > 512 {
            return Err(StorageError::InvalidKey(
                "key exceeds maximum length of 512 characters".into(),
            ));
        }
        if key.starts_with('/') || key.ends_with('/') {
            return Err(StorageError::InvalidKey(
                "key must not start or end with '/'".into(),
            ));
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.'))
        {
            return Err(StorageError::InvalidKey(
                "key contains invalid characters (allowed: a-zA-Z0-9, /, -, _, .)".into(),
            ));
        }
        for segment in key.split('/') {
            if segment.is_empty() {
                return Err(StorageError::InvalidKey(
                    "key must not contain empty segments".into(),
                ));
            }
            if segment.starts_with('.') {
                return Err(StorageError::InvalidKey(
                    "key segments must not start with '.'".into(),
                ));
            }
        }

        Ok(Self(key.to_string()))
    }

    /// Build a key from a flat file name, inserting a random suffix before the
    /// extension so that repeated uploads of the same name never collide.
    pub fn with_random_suffix(file_name: &str) -> Result<Self, StorageError> {
        let suffix: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(RANDOM_SUFFIX_LEN)
            .map(char::from)
            .collect();

        let key = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
                format!("{stem}-{suffix}.{ext}")
            }
            _ => format!("{file_name}-{suffix}"),
        };

        Self::parse(&key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment of the key.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
