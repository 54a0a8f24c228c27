use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use reqwest::redirect::Policy;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use serde_json::Value;
use tempfile::TempDir;
use uuid::Uuid;

use clipshelf_server::config::AppConfig;
use clipshelf_server::entity::{asset, video};
use clipshelf_server::mailer::{Mailer, Message};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "initial-pass";
pub const JWT_SECRET: &str = "test-secret-for-integration-tests";

pub mod routes {
    pub const HOME: &str = "/";
    pub const ASSETS: &str = "/assets";
    pub const CONTACT: &str = "/contact";
    pub const SEARCH_API: &str = "/api/search";
    pub const UPLOAD_API: &str = "/api/upload";

    pub const ADMIN: &str = "/admin";
    pub const LOGIN: &str = "/admin/login";
    pub const LOGOUT: &str = "/admin/logout";
    pub const FORGOT_PASSWORD: &str = "/admin/forgot-password";
    pub const RESET_PASSWORD: &str = "/admin/reset-password";
    pub const RECOVERY_SESSION: &str = "/admin/reset-password/session";
    pub const CHANGE_PASSWORD: &str = "/admin/change-password";
    pub const ADMIN_VIDEOS: &str = "/admin/videos";
    pub const SETTINGS: &str = "/admin/settings";

    pub fn video(slug: &str) -> String {
        format!("/videos/{slug}")
    }

    pub fn comments(slug: &str) -> String {
        format!("/videos/{slug}/comments")
    }

    pub fn download(asset_id: impl std::fmt::Display) -> String {
        format!("/assets/{asset_id}/download")
    }

    pub fn edit_video(id: impl std::fmt::Display) -> String {
        format!("/admin/videos/{id}/edit")
    }

    pub fn update_video(id: impl std::fmt::Display) -> String {
        format!("/admin/videos/{id}")
    }

    pub fn delete_video(id: impl std::fmt::Display) -> String {
        format!("/admin/videos/{id}/delete")
    }

    pub fn video_assets(id: impl std::fmt::Display) -> String {
        format!("/admin/videos/{id}/assets")
    }

    pub fn delete_asset(id: impl std::fmt::Display, asset_id: impl std::fmt::Display) -> String {
        format!("/admin/videos/{id}/assets/{asset_id}/delete")
    }
}

/// Mailer that keeps every message for inspection.
#[derive(Default)]
pub struct CapturingMailer {
    pub sent: Mutex<Vec<Message>>,
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, message: Message) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// A running test server backed by a throwaway SQLite database and blob directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    pub mailer: Arc<CapturingMailer>,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// `Location` header of redirects.
    pub location: Option<String>,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let location = res
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            location,
            text,
            body,
        }
    }

    /// Assert a `303 See Other` to `target` (ignoring query and fragment).
    pub fn assert_redirect(&self, target: &str) {
        assert_eq!(self.status, 303, "Expected redirect, got: {}", self.text);
        let location = self.location.as_deref().unwrap_or_default();
        let path = location.split(['?', '#']).next().unwrap_or_default();
        assert_eq!(path, target, "Unexpected redirect target {location}");
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(&[]).await
    }

    /// Spawn with extra config overrides applied last, e.g. `("comments.provider", "giscus")`.
    pub async fn spawn_with(overrides: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let builder = AppConfig::builder()
            .unwrap()
            .set_override("server.public_url", format!("http://{addr}"))
            .unwrap()
            .set_override("database.url", db_url)
            .unwrap()
            .set_override("auth.jwt_secret", JWT_SECRET)
            .unwrap()
            .set_override("auth.admin_email", ADMIN_EMAIL)
            .unwrap()
            .set_override("auth.admin_password", ADMIN_PASSWORD)
            .unwrap()
            .set_override(
                "storage.root",
                dir.path().join("blobs").display().to_string(),
            )
            .unwrap()
            .set_override("storage.public_base_url", format!("http://{addr}/blobs"))
            .unwrap()
            .set_override("storage.max_blob_size", 1024 * 1024)
            .unwrap();
        let builder = overrides.iter().fold(builder, |builder, (key, value)| {
            builder.set_override(*key, *value).unwrap()
        });
        let config: AppConfig = builder
            .build()
            .expect("Failed to build config")
            .try_deserialize()
            .expect("Failed to deserialize config");

        let mailer = Arc::new(CapturingMailer::default());
        let state = clipshelf_server::build_state(config, mailer.clone())
            .await
            .expect("Failed to build state");
        let db = state.db.clone();

        let app = clipshelf_server::build_router(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = new_client();

        Self {
            addr,
            client,
            db,
            mailer,
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.get_as(&self.client, path).await
    }

    /// GET with a client other than the app's own, e.g. a second browser.
    pub async fn get_as(&self, client: &Client, path: &str) -> TestResponse {
        let res = client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("Failed to send form");

        TestResponse::from_response(res).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_multipart(&self, path: &str, form: reqwest::multipart::Form) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart request");

        TestResponse::from_response(res).await
    }

    /// Sign in as the bootstrap admin; the session cookie is kept by the client.
    pub async fn login(&self) {
        self.login_with(ADMIN_PASSWORD).await.assert_redirect(routes::ADMIN);
    }

    /// A separate cookie jar signed in as the bootstrap admin.
    pub async fn login_second_client(&self) -> Client {
        let client = new_client();
        let res = client
            .post(self.url(routes::LOGIN))
            .form(&[("email", ADMIN_EMAIL), ("password", ADMIN_PASSWORD)])
            .send()
            .await
            .expect("Failed to send login form");
        TestResponse::from_response(res)
            .await
            .assert_redirect(routes::ADMIN);
        client
    }

    pub async fn login_with(&self, password: &str) -> TestResponse {
        self.post_form(
            routes::LOGIN,
            &[("email", ADMIN_EMAIL), ("password", password)],
        )
        .await
    }

    /// Insert a video directly, `age_minutes` in the past.
    pub async fn insert_video(&self, title: &str, slug: &str, tags: &[&str], age_minutes: i64) -> Uuid {
        let id = Uuid::now_v7();
        let created_at: DateTime<Utc> = Utc::now() - Duration::minutes(age_minutes);
        let model = video::ActiveModel {
            id: Set(id),
            title: Set(title.to_string()),
            slug: Set(slug.to_string()),
            tiktok_url: Set(format!("https://www.tiktok.com/@creator/video/{slug}")),
            cover_image_url: Set(None),
            description: Set(String::new()),
            tags: Set(video::TagList(tags.iter().map(|t| t.to_string()).collect())),
            created_at: Set(created_at),
        };
        video::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .expect("Failed to insert video");
        id
    }

    pub async fn insert_asset(&self, video_id: Uuid, name: &str, mime_type: &str) -> Uuid {
        let id = Uuid::now_v7();
        let model = asset::ActiveModel {
            id: Set(id),
            video_id: Set(video_id),
            name: Set(name.to_string()),
            mime_type: Set(mime_type.to_string()),
            blob_url: Set(format!("https://cdn.example.com/{name}")),
            download_count: Set(0),
            created_at: Set(Utc::now()),
        };
        asset::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .expect("Failed to insert asset");
        id
    }

    pub fn sent_mail(&self) -> Vec<Message> {
        self.mailer.sent.lock().unwrap().clone()
    }
}

fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to build HTTP client")
}

/// Multipart body of the admin video form.
pub fn video_form(title: &str, slug: &str, tags: &str) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new()
        .text("title", title.to_string())
        .text("slug", slug.to_string())
        .text("tiktok_url", "https://www.tiktok.com/@creator/video/1")
        .text("description", "Behind the scenes")
        .text("tags", tags.to_string())
}

/// A 1x1 PNG.
pub fn png_bytes() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}
