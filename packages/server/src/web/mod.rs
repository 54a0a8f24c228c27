//! Server-rendered HTML pages: the public site and the admin area.

mod account;
mod admin;
mod forms;
mod public;
pub mod templates;
mod views;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use common::storage::StorageError;
use sea_orm::{DbErr, EntityTrait};
use serde::Serialize;
use tera::Context;

use crate::config::AppConfig;
use crate::entity::site_config;
use crate::error::AppError;
use crate::handlers::download::download_asset;
use crate::models::site::SiteHeader;
use crate::state::AppState;

/// Headroom for multipart framing and text fields on top of the file itself.
const FORM_OVERHEAD: usize = 1024 * 1024;

/// An [`AppError`] rendered as an HTML error page instead of JSON.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl From<DbErr> for PageError {
    fn from(err: DbErr) -> Self {
        PageError(err.into())
    }
}

impl From<StorageError> for PageError {
    fn from(err: StorageError) -> Self {
        PageError(err.into())
    }
}

impl From<tera::Error> for PageError {
    fn from(err: tera::Error) -> Self {
        PageError(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, body) = self.0.into_body();

        let mut context = Context::new();
        context.insert("site", &SiteHeader::default());
        context.insert("is_admin", &false);
        context.insert("status", &status.as_u16());
        context.insert("message", &body.message);

        match templates::render("error.html", &context) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {:?}", e);
                (status, body.message).into_response()
            }
        }
    }
}

/// One-shot status message shown above a form.
#[derive(Debug, Clone, Serialize)]
pub struct Flash {
    pub kind: &'static str,
    pub text: String,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: "success",
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: "error",
            text: text.into(),
        }
    }
}

/// Human-readable text of an error, as shown inside a form.
pub(crate) fn error_text(err: AppError) -> String {
    err.into_body().1.message
}

pub(crate) fn render(template: &str, context: &Context) -> Result<Html<String>, PageError> {
    Ok(Html(templates::render(template, context)?))
}

pub(crate) fn render_with_status(
    status: StatusCode,
    template: &str,
    context: &Context,
) -> Result<Response, PageError> {
    Ok((status, render(template, context)?).into_response())
}

/// Stored site header, or the defaults when the row is missing.
pub(crate) async fn load_site_header(state: &AppState) -> Result<SiteHeader, DbErr> {
    Ok(site_config::Entity::find_by_id(site_config::SINGLETON_ID)
        .one(&state.db)
        .await?
        .map(SiteHeader::from)
        .unwrap_or_default())
}

/// Base template context: the site header and whether an admin is signed in.
pub(crate) async fn page_context(state: &AppState, is_admin: bool) -> Result<Context, PageError> {
    let mut context = Context::new();
    context.insert("site", &load_site_header(state).await?);
    context.insert("is_admin", &is_admin);
    Ok(context)
}

pub fn router(config: &AppConfig) -> Router<AppState> {
    let max_file = usize::try_from(config.storage.max_blob_size).unwrap_or(usize::MAX);
    let upload_limit = DefaultBodyLimit::max(max_file.saturating_mul(2).saturating_add(FORM_OVERHEAD));

    let site = Router::new()
        .route("/", get(public::home))
        .route("/search", get(public::search_page))
        .route("/assets", get(public::asset_library))
        .route("/assets/{id}/download", get(download_asset))
        .route("/videos/{slug}", get(public::video_page))
        .route("/videos/{slug}/comments", post(public::post_comment))
        .route("/contact", get(public::contact_page).post(public::contact_submit));

    let account = Router::new()
        .route("/admin/login", get(account::login_page).post(account::login))
        .route("/admin/logout", post(account::logout))
        .route("/admin/forgot-password", post(account::forgot_password))
        .route(
            "/admin/reset-password",
            get(account::reset_password_page).post(account::reset_password),
        )
        .route("/admin/reset-password/session", post(account::recovery_session))
        .route(
            "/admin/change-password",
            get(account::change_password_page).post(account::change_password),
        );

    let admin = Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/admin/videos", get(admin::list_videos).post(admin::create_video))
        .route("/admin/videos/new", get(admin::new_video))
        .route("/admin/videos/{id}/edit", get(admin::edit_video))
        .route("/admin/videos/{id}", post(admin::update_video))
        .route("/admin/videos/{id}/delete", post(admin::delete_video))
        .route("/admin/videos/{id}/assets", post(admin::add_asset))
        .route(
            "/admin/videos/{id}/assets/{asset_id}/delete",
            post(admin::delete_asset),
        )
        .route(
            "/admin/settings",
            get(admin::settings_page).post(admin::update_settings),
        )
        .layer(upload_limit);

    site.merge(account).merge(admin)
}
