use serde::Serialize;

use crate::entity::site_config;
use crate::error::AppError;

/// Site header shown on every public page.
#[derive(Debug, Clone, Serialize)]
pub struct SiteHeader {
    pub site_title: String,
    pub site_subtitle: String,
    pub cover_image_url: Option<String>,
}

impl Default for SiteHeader {
    fn default() -> Self {
        Self {
            site_title: site_config::DEFAULT_TITLE.into(),
            site_subtitle: site_config::DEFAULT_SUBTITLE.into(),
            cover_image_url: None,
        }
    }
}

impl From<site_config::Model> for SiteHeader {
    fn from(model: site_config::Model) -> Self {
        Self {
            site_title: model.site_title,
            site_subtitle: model.site_subtitle,
            cover_image_url: model.cover_image_url,
        }
    }
}

/// Text fields of the admin settings form.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SettingsForm {
    pub site_title: String,
    pub site_subtitle: String,
}

impl SettingsForm {
    pub fn validate(&self) -> Result<(String, String), AppError> {
        let title = self.site_title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Site title is required".into()));
        }
        Ok((title.to_string(), self.site_subtitle.trim().to_string()))
    }
}
