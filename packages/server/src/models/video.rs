use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::video;
use crate::error::AppError;
use crate::utils::slug::generate_slug;

/// Query string for `GET /api/search`.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    /// Text matched case-insensitively against title, slug and tags.
    #[param(example = "dance")]
    pub q: Option<String>,
}

/// Video record as returned by the JSON API.
#[derive(Serialize, utoipa::ToSchema)]
pub struct VideoResponse {
    /// Video ID (UUIDv7).
    #[schema(example = "01936f0e-1234-7abc-8000-000000000001")]
    pub id: String,
    #[schema(example = "My First Clip!")]
    pub title: String,
    #[schema(example = "my-first-clip")]
    pub slug: String,
    #[schema(example = "https://www.tiktok.com/@creator/video/123")]
    pub tiktok_url: String,
    pub cover_image_url: Option<String>,
    pub description: String,
    #[schema(example = json!(["dance", "challenge"]))]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<video::Model> for VideoResponse {
    fn from(model: video::Model) -> Self {
        Self {
            id: model.id.to_string(),
            title: model.title,
            slug: model.slug,
            tiktok_url: model.tiktok_url,
            cover_image_url: model.cover_image_url,
            description: model.description,
            tags: model.tags.0,
            created_at: model.created_at,
        }
    }
}

/// Text fields of the admin video form.
#[derive(Debug, Default, Clone, Serialize)]
pub struct VideoForm {
    pub title: String,
    pub slug: String,
    pub tiktok_url: String,
    pub description: String,
    /// Comma-separated, as typed.
    pub tags: String,
}

/// Validated video fields ready to be written.
#[derive(Debug, PartialEq, Eq)]
pub struct VideoInput {
    pub title: String,
    pub slug: String,
    pub tiktok_url: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Split a comma-separated tag list, trimming and dropping blanks.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

impl VideoForm {
    pub fn from_model(model: &video::Model) -> Self {
        Self {
            title: model.title.clone(),
            slug: model.slug.clone(),
            tiktok_url: model.tiktok_url.clone(),
            description: model.description.clone(),
            tags: model.tags.0.join(", "),
        }
    }

    /// Validate the form, deriving the slug from the title when it was left blank.
    pub fn validate(&self) -> Result<VideoInput, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Title is required".into()));
        }
        let tiktok_url = self.tiktok_url.trim();
        if tiktok_url.is_empty() {
            return Err(AppError::Validation("TikTok URL is required".into()));
        }

        let slug = match self.slug.trim() {
            "" => generate_slug(title),
            given => given.to_string(),
        };
        if slug.is_empty() {
            return Err(AppError::Validation(
                "Slug cannot be empty; add letters or digits to the title".into(),
            ));
        }

        Ok(VideoInput {
            title: title.to_string(),
            slug,
            tiktok_url: tiktok_url.to_string(),
            description: self.description.trim().to_string(),
            tags: parse_tags(&self.tags),
        })
    }
}
