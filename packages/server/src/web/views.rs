//! Template view models.

use chrono::{DateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

use crate::config::AppConfig;
use crate::entity::{asset, comment, video};
use crate::utils::media::{ASSET_THUMBNAIL_WIDTH, is_image, thumbnail_url};

/// `March 5, 2025`
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

/// Everything but RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode one path segment; unreserved characters pass through.
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

pub fn video_href(slug: &str) -> String {
    format!("/videos/{}", encode_path_segment(slug))
}

#[derive(Debug, Serialize)]
pub struct VideoCard {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub href: String,
    pub tiktok_url: String,
    pub thumbnail_url: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub created_at: String,
}

impl VideoCard {
    pub fn new(model: &video::Model, config: &AppConfig) -> Self {
        Self {
            id: model.id.to_string(),
            title: model.title.clone(),
            slug: model.slug.clone(),
            href: video_href(&model.slug),
            tiktok_url: model.tiktok_url.clone(),
            thumbnail_url: model.cover_image_url.as_deref().map(|url| {
                thumbnail_url(url, config.site.thumbnail_width, &config.site.thumbnail_host)
            }),
            description: model.description.clone(),
            tags: model.tags.0.clone(),
            created_at: format_date(&model.created_at),
        }
    }

    pub fn list(models: &[video::Model], config: &AppConfig) -> Vec<Self> {
        models.iter().map(|m| Self::new(m, config)).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct AssetTile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub blob_url: String,
    /// Only images get a preview.
    pub thumbnail_url: Option<String>,
    pub download_url: String,
    pub download_count: i32,
    pub created_at: String,
    pub video_title: Option<String>,
    pub video_href: Option<String>,
}

impl AssetTile {
    pub fn new(model: &asset::Model, video: Option<&video::Model>, config: &AppConfig) -> Self {
        let thumbnail = is_image(&model.mime_type).then(|| {
            thumbnail_url(
                &model.blob_url,
                ASSET_THUMBNAIL_WIDTH,
                &config.site.thumbnail_host,
            )
        });
        Self {
            id: model.id.to_string(),
            name: model.name.clone(),
            mime_type: model.mime_type.clone(),
            blob_url: model.blob_url.clone(),
            thumbnail_url: thumbnail,
            download_url: format!("/assets/{}/download", model.id),
            download_count: model.download_count,
            created_at: format_date(&model.created_at),
            video_title: video.map(|v| v.title.clone()),
            video_href: video.map(|v| video_href(&v.slug)),
        }
    }

    pub fn list(models: &[asset::Model], config: &AppConfig) -> Vec<Self> {
        models.iter().map(|m| Self::new(m, None, config)).collect()
    }

    pub fn with_videos(rows: &[(asset::Model, Option<video::Model>)], config: &AppConfig) -> Vec<Self> {
        rows.iter()
            .map(|(a, v)| Self::new(a, v.as_ref(), config))
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub name: String,
    pub content: String,
    pub created_at: String,
}

impl From<&comment::Model> for CommentView {
    fn from(model: &comment::Model) -> Self {
        Self {
            name: model.name.clone(),
            content: model.content.clone(),
            created_at: format_date(&model.created_at),
        }
    }
}
