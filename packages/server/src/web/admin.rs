//! Admin area: dashboard, video and asset management, site settings.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr, TransactionTrait,
};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use super::forms::{MultipartForm, store_upload};
use super::views::{AssetTile, VideoCard};
use super::{Flash, PageError, error_text, load_site_header, page_context, render, render_with_status};
use crate::entity::{asset, comment, download_log, site_config, video};
use crate::error::AppError;
use crate::extractors::auth::AdminPage;
use crate::handlers::search::videos_newest_first;
use crate::models::site::SettingsForm;
use crate::models::video::{VideoForm, VideoInput};
use crate::state::AppState;

/// Rows shown in the dashboard's download ranking.
const TOP_ASSETS: u64 = 10;

#[derive(Debug, Serialize)]
struct DashboardStats {
    videos: u64,
    assets: u64,
    comments: u64,
    downloads: i64,
}

fn parse_video_id(raw: &str) -> Result<Uuid, PageError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Video not found".into()).into())
}

async fn find_video(state: &AppState, id: Uuid) -> Result<video::Model, PageError> {
    video::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".into()).into())
}

/// Message for a failed video write. A unique violation can only come from the slug.
fn video_write_error(action: &str, err: DbErr) -> String {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => "Slug is already in use".into(),
        _ => {
            tracing::error!("{} failed: {}", action, err);
            format!("{action}: {err}")
        }
    }
}

fn video_form_from(form: &MultipartForm) -> VideoForm {
    VideoForm {
        title: form.text("title"),
        slug: form.text("slug"),
        tiktok_url: form.text("tiktok_url"),
        description: form.text("description"),
        tags: form.text("tags"),
    }
}

/// Render the add form (`video = None`) or the edit form with the video's assets.
async fn video_form_page(
    state: &AppState,
    video: Option<&video::Model>,
    form: &VideoForm,
    flash: Option<Flash>,
    status: StatusCode,
) -> Result<Response, PageError> {
    let mut context = page_context(state, true).await?;
    context.insert("form", form);

    match video {
        Some(video) => {
            let assets = asset::Entity::find()
                .filter(asset::Column::VideoId.eq(video.id))
                .order_by_desc(asset::Column::CreatedAt)
                .all(&state.db)
                .await?;
            context.insert("video", &VideoCard::new(video, &state.config));
            context.insert("assets", &AssetTile::list(&assets, &state.config));
            context.insert("action", &format!("/admin/videos/{}", video.id));
        }
        None => context.insert("action", "/admin/videos"),
    }
    if let Some(flash) = flash {
        context.insert("flash", &flash);
    }

    render_with_status(status, "admin/video_form.html", &context)
}

#[instrument(skip(state, admin), fields(user_id = admin.user_id))]
pub async fn dashboard(
    State(state): State<AppState>,
    AdminPage(admin): AdminPage,
) -> Result<Html<String>, PageError> {
    let videos = video::Entity::find().count(&state.db).await?;
    let assets = asset::Entity::find().count(&state.db).await?;
    let comments = comment::Entity::find().count(&state.db).await?;
    let downloads: Option<i64> = asset::Entity::find()
        .select_only()
        .column_as(asset::Column::DownloadCount.sum(), "total")
        .into_tuple::<Option<i64>>()
        .one(&state.db)
        .await?
        .flatten();

    let top = asset::Entity::find()
        .find_also_related(video::Entity)
        .order_by_desc(asset::Column::DownloadCount)
        .order_by_desc(asset::Column::CreatedAt)
        .limit(TOP_ASSETS)
        .all(&state.db)
        .await?;

    let mut context = page_context(&state, true).await?;
    context.insert("admin_email", &admin.email);
    context.insert(
        "stats",
        &DashboardStats {
            videos,
            assets,
            comments,
            downloads: downloads.unwrap_or(0),
        },
    );
    context.insert("top_assets", &AssetTile::with_videos(&top, &state.config));

    render("admin/dashboard.html", &context)
}

#[instrument(skip(state, _admin))]
pub async fn list_videos(
    State(state): State<AppState>,
    AdminPage(_admin): AdminPage,
) -> Result<Html<String>, PageError> {
    let videos = videos_newest_first(&state.db, None).await?;
    let mut context = page_context(&state, true).await?;
    context.insert("videos", &VideoCard::list(&videos, &state.config));
    render("admin/videos.html", &context)
}

pub async fn new_video(
    State(state): State<AppState>,
    AdminPage(_admin): AdminPage,
) -> Result<Response, PageError> {
    video_form_page(&state, None, &VideoForm::default(), None, StatusCode::OK).await
}

#[instrument(skip(state, admin, multipart), fields(user_id = admin.user_id))]
pub async fn create_video(
    State(state): State<AppState>,
    AdminPage(admin): AdminPage,
    multipart: Multipart,
) -> Result<Response, PageError> {
    let mut data = MultipartForm::read(multipart).await?;
    let form = video_form_from(&data);

    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            let flash = Flash::error(error_text(e));
            return video_form_page(&state, None, &form, Some(flash), StatusCode::BAD_REQUEST).await;
        }
    };

    let cover_image_url = match data.take_file("cover_image") {
        Some(file) => match store_upload(&state, &file).await {
            Ok((url, _)) => Some(url),
            Err(e) => {
                let flash = Flash::error(format!("Error adding video: {}", error_text(e)));
                return video_form_page(&state, None, &form, Some(flash), StatusCode::BAD_REQUEST)
                    .await;
            }
        },
        None => None,
    };

    let VideoInput {
        title,
        slug,
        tiktok_url,
        description,
        tags,
    } = input;
    let id = Uuid::now_v7();
    let model = video::ActiveModel {
        id: Set(id),
        title: Set(title),
        slug: Set(slug.clone()),
        tiktok_url: Set(tiktok_url),
        cover_image_url: Set(cover_image_url),
        description: Set(description),
        tags: Set(video::TagList(tags)),
        created_at: Set(Utc::now()),
    };

    if let Err(e) = video::Entity::insert(model)
        .exec_without_returning(&state.db)
        .await
    {
        let flash = Flash::error(video_write_error("Error adding video", e));
        return video_form_page(&state, None, &form, Some(flash), StatusCode::BAD_REQUEST).await;
    }

    tracing::info!(video_id = %id, slug = %slug, "Video created");
    Ok(Redirect::to("/admin/videos").into_response())
}

#[instrument(skip(state, _admin))]
pub async fn edit_video(
    State(state): State<AppState>,
    AdminPage(_admin): AdminPage,
    Path(id): Path<String>,
) -> Result<Response, PageError> {
    let video = find_video(&state, parse_video_id(&id)?).await?;
    let form = VideoForm::from_model(&video);
    video_form_page(&state, Some(&video), &form, None, StatusCode::OK).await
}

#[instrument(skip(state, admin, multipart), fields(user_id = admin.user_id))]
pub async fn update_video(
    State(state): State<AppState>,
    AdminPage(admin): AdminPage,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, PageError> {
    let video = find_video(&state, parse_video_id(&id)?).await?;
    let mut data = MultipartForm::read(multipart).await?;
    let form = video_form_from(&data);

    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            let flash = Flash::error(error_text(e));
            return video_form_page(&state, Some(&video), &form, Some(flash), StatusCode::BAD_REQUEST)
                .await;
        }
    };

    let cover_image_url = match data.take_file("cover_image") {
        Some(file) => match store_upload(&state, &file).await {
            Ok((url, _)) => Some(url),
            Err(e) => {
                let flash = Flash::error(format!("Error updating video: {}", error_text(e)));
                return video_form_page(
                    &state,
                    Some(&video),
                    &form,
                    Some(flash),
                    StatusCode::BAD_REQUEST,
                )
                .await;
            }
        },
        None => video.cover_image_url.clone(),
    };

    let mut active: video::ActiveModel = video.clone().into();
    active.title = Set(input.title);
    active.slug = Set(input.slug);
    active.tiktok_url = Set(input.tiktok_url);
    active.description = Set(input.description);
    active.tags = Set(video::TagList(input.tags));
    active.cover_image_url = Set(cover_image_url);

    if let Err(e) = active.update(&state.db).await {
        let flash = Flash::error(video_write_error("Error updating video", e));
        return video_form_page(&state, Some(&video), &form, Some(flash), StatusCode::BAD_REQUEST)
            .await;
    }

    tracing::info!(video_id = %video.id, "Video updated");
    Ok(Redirect::to("/admin/videos").into_response())
}

/// Delete a video together with its assets, their download logs and its comments.
#[instrument(skip(state, admin), fields(user_id = admin.user_id))]
pub async fn delete_video(
    State(state): State<AppState>,
    AdminPage(admin): AdminPage,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    let id = parse_video_id(&id)?;

    let txn = state.db.begin().await?;

    let asset_ids: Vec<Uuid> = asset::Entity::find()
        .select_only()
        .column(asset::Column::Id)
        .filter(asset::Column::VideoId.eq(id))
        .into_tuple()
        .all(&txn)
        .await?;
    if !asset_ids.is_empty() {
        download_log::Entity::delete_many()
            .filter(download_log::Column::AssetId.is_in(asset_ids))
            .exec(&txn)
            .await?;
    }
    asset::Entity::delete_many()
        .filter(asset::Column::VideoId.eq(id))
        .exec(&txn)
        .await?;
    comment::Entity::delete_many()
        .filter(comment::Column::VideoId.eq(id))
        .exec(&txn)
        .await?;

    let result = video::Entity::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Video not found".into()).into());
    }

    txn.commit().await?;

    tracing::info!(video_id = %id, "Video deleted");
    Ok(Redirect::to("/admin/videos"))
}

#[instrument(skip(state, admin, multipart), fields(user_id = admin.user_id))]
pub async fn add_asset(
    State(state): State<AppState>,
    AdminPage(admin): AdminPage,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, PageError> {
    let video = find_video(&state, parse_video_id(&id)?).await?;
    let mut data = MultipartForm::read(multipart).await?;
    let form = VideoForm::from_model(&video);

    let Some(file) = data.take_file("file") else {
        let flash = Flash::error("Please select a file to upload.");
        return video_form_page(&state, Some(&video), &form, Some(flash), StatusCode::BAD_REQUEST)
            .await;
    };

    let (blob_url, mime_type) = match store_upload(&state, &file).await {
        Ok(stored) => stored,
        Err(e) => {
            let flash = Flash::error(format!("Error adding asset: {}", error_text(e)));
            return video_form_page(&state, Some(&video), &form, Some(flash), StatusCode::BAD_REQUEST)
                .await;
        }
    };

    let name = match data.text("name").trim() {
        "" => file.file_name.trim().to_string(),
        given => given.to_string(),
    };
    let asset_id = Uuid::now_v7();
    let model = asset::ActiveModel {
        id: Set(asset_id),
        video_id: Set(video.id),
        name: Set(name),
        mime_type: Set(mime_type),
        blob_url: Set(blob_url),
        download_count: Set(0),
        created_at: Set(Utc::now()),
    };

    if let Err(e) = asset::Entity::insert(model)
        .exec_without_returning(&state.db)
        .await
    {
        tracing::error!(video_id = %video.id, "Failed to store asset: {}", e);
        let flash = Flash::error(format!("Error adding asset: {e}"));
        return video_form_page(&state, Some(&video), &form, Some(flash), StatusCode::BAD_REQUEST)
            .await;
    }

    tracing::info!(video_id = %video.id, asset_id = %asset_id, "Asset added");
    Ok(Redirect::to(&format!("/admin/videos/{}/edit", video.id)).into_response())
}

/// Delete one asset of a video. The stored blob is left in place.
#[instrument(skip(state, admin), fields(user_id = admin.user_id))]
pub async fn delete_asset(
    State(state): State<AppState>,
    AdminPage(admin): AdminPage,
    Path((id, asset_id)): Path<(String, String)>,
) -> Result<Redirect, PageError> {
    let video_id = parse_video_id(&id)?;
    let asset_id =
        Uuid::parse_str(&asset_id).map_err(|_| AppError::NotFound("Asset not found".into()))?;

    let txn = state.db.begin().await?;

    let found = asset::Entity::find_by_id(asset_id)
        .filter(asset::Column::VideoId.eq(video_id))
        .one(&txn)
        .await?;
    if found.is_none() {
        return Err(AppError::NotFound("Asset not found".into()).into());
    }

    download_log::Entity::delete_many()
        .filter(download_log::Column::AssetId.eq(asset_id))
        .exec(&txn)
        .await?;
    asset::Entity::delete_by_id(asset_id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(video_id = %video_id, asset_id = %asset_id, "Asset deleted");
    Ok(Redirect::to(&format!("/admin/videos/{video_id}/edit")))
}

async fn settings_form_page(
    state: &AppState,
    form: &SettingsForm,
    flash: Option<Flash>,
    status: StatusCode,
) -> Result<Response, PageError> {
    let mut context = page_context(state, true).await?;
    context.insert("form", form);
    if let Some(flash) = flash {
        context.insert("flash", &flash);
    }
    render_with_status(status, "admin/settings.html", &context)
}

pub async fn settings_page(
    State(state): State<AppState>,
    AdminPage(_admin): AdminPage,
) -> Result<Response, PageError> {
    let header = load_site_header(&state).await?;
    let form = SettingsForm {
        site_title: header.site_title,
        site_subtitle: header.site_subtitle,
    };
    settings_form_page(&state, &form, None, StatusCode::OK).await
}

#[instrument(skip(state, admin, multipart), fields(user_id = admin.user_id))]
pub async fn update_settings(
    State(state): State<AppState>,
    AdminPage(admin): AdminPage,
    multipart: Multipart,
) -> Result<Response, PageError> {
    let mut data = MultipartForm::read(multipart).await?;
    let form = SettingsForm {
        site_title: data.text("site_title"),
        site_subtitle: data.text("site_subtitle"),
    };

    let (site_title, site_subtitle) = match form.validate() {
        Ok(fields) => fields,
        Err(e) => {
            let flash = Flash::error(error_text(e));
            return settings_form_page(&state, &form, Some(flash), StatusCode::BAD_REQUEST).await;
        }
    };

    let new_cover = match data.take_file("cover_image") {
        Some(file) => match store_upload(&state, &file).await {
            Ok((url, _)) => Some(url),
            Err(e) => {
                let flash = Flash::error(format!("Error updating settings: {}", error_text(e)));
                return settings_form_page(&state, &form, Some(flash), StatusCode::BAD_REQUEST)
                    .await;
            }
        },
        None => None,
    };

    if let Err(e) = save_settings(&state, site_title, site_subtitle, new_cover).await {
        tracing::error!("Failed to save settings: {}", e);
        let flash = Flash::error(format!("Error updating settings: {e}"));
        return settings_form_page(&state, &form, Some(flash), StatusCode::BAD_REQUEST).await;
    }

    tracing::info!("Site settings updated");
    settings_form_page(
        &state,
        &form,
        Some(Flash::success("Settings updated successfully!")),
        StatusCode::OK,
    )
    .await
}

/// Upsert the singleton settings row. The cover is kept when no new one was uploaded.
async fn save_settings(
    state: &AppState,
    site_title: String,
    site_subtitle: String,
    new_cover: Option<String>,
) -> Result<(), DbErr> {
    let existing = site_config::Entity::find_by_id(site_config::SINGLETON_ID)
        .one(&state.db)
        .await?;

    match existing {
        Some(row) => {
            let mut active: site_config::ActiveModel = row.into();
            active.site_title = Set(site_title);
            active.site_subtitle = Set(site_subtitle);
            if let Some(url) = new_cover {
                active.cover_image_url = Set(Some(url));
            }
            active.updated_at = Set(Utc::now());
            active.update(&state.db).await?;
        }
        None => {
            let model = site_config::ActiveModel {
                id: Set(site_config::SINGLETON_ID),
                site_title: Set(site_title),
                site_subtitle: Set(site_subtitle),
                cover_image_url: Set(new_cover),
                updated_at: Set(Utc::now()),
            };
            site_config::Entity::insert(model)
                .exec_without_returning(&state.db)
                .await?;
        }
    }
    Ok(())
}
