use common::StorageConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::utils::media::DEFAULT_THUMBNAIL_WIDTH;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Absolute base URL used when building links sent outside the site.
    pub public_url: String,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
    pub recovery_ttl_minutes: i64,
    pub upload_token_ttl_minutes: i64,
    /// Bootstrap admin created on startup if missing.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Host whose blob URLs support the `w` resize parameter.
    pub thumbnail_host: String,
    pub thumbnail_width: u32,
    pub latest_videos: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommentProvider {
    Builtin,
    Giscus,
    Cusdis,
}

/// Giscus embed settings; comments live in GitHub Discussions.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct GiscusConfig {
    pub repo: String,
    pub repo_id: String,
    pub category: String,
    pub category_id: String,
    pub theme: String,
}

impl Default for GiscusConfig {
    fn default() -> Self {
        Self {
            repo: String::new(),
            repo_id: String::new(),
            category: String::new(),
            category_id: String::new(),
            theme: "light".into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CusdisConfig {
    pub host: String,
    pub app_id: String,
}

impl Default for CusdisConfig {
    fn default() -> Self {
        Self {
            host: "https://cusdis.com".into(),
            app_id: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommentsConfig {
    pub provider: CommentProvider,
    #[serde(default)]
    pub giscus: GiscusConfig,
    #[serde(default)]
    pub cusdis: CusdisConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub site: SiteConfig,
    pub comments: CommentsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., CLIPSHELF__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("CLIPSHELF").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Defaults shared by [`AppConfig::load`] and tests that assemble a config in code.
    pub fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.public_url", "http://127.0.0.1:3000")?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://clipshelf.db?mode=rwc")?
            .set_default("auth.session_ttl_hours", 168)?
            .set_default("auth.recovery_ttl_minutes", 60)?
            .set_default("auth.upload_token_ttl_minutes", 15)?
            .set_default("site.thumbnail_host", "vercel-storage.com")?
            .set_default("site.thumbnail_width", i64::from(DEFAULT_THUMBNAIL_WIDTH))?
            .set_default("site.latest_videos", 6)?
            .set_default("comments.provider", "builtin")
    }
}
