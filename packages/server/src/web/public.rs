use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use super::views::{AssetTile, CommentView, VideoCard, video_href};
use super::{Flash, PageError, page_context, render};
use crate::config::CommentProvider;
use crate::entity::{asset, comment, video};
use crate::error::AppError;
use crate::extractors::auth::MaybeAdmin;
use crate::handlers::search::videos_newest_first;
use crate::models::asset::{AssetLibraryQuery, AssetSort};
use crate::models::comment::{CommentForm, CommentStatus, validate_comment};
use crate::state::AppState;
use crate::utils::search::filter_videos;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct VideoPageParams {
    /// Outcome code of a comment submission.
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

pub(crate) async fn find_video_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<video::Model, PageError> {
    video::Entity::find()
        .filter(video::Column::Slug.eq(slug))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".into()).into())
}

/// Run a sidebar search. Blank queries do not search at all.
async fn search_cards(state: &AppState, query: &str) -> Result<Option<Vec<VideoCard>>, PageError> {
    if query.trim().is_empty() {
        return Ok(None);
    }
    let videos = videos_newest_first(&state.db, None).await?;
    let results = filter_videos(videos, query);
    Ok(Some(VideoCard::list(&results, &state.config)))
}

#[instrument(skip(state, admin))]
pub async fn home(
    State(state): State<AppState>,
    MaybeAdmin(admin): MaybeAdmin,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, PageError> {
    let mut context = page_context(&state, admin.is_some()).await?;

    let latest = videos_newest_first(&state.db, Some(state.config.site.latest_videos)).await?;
    context.insert("videos", &VideoCard::list(&latest, &state.config));

    let results = search_cards(&state, &params.q).await?;
    context.insert("searched", &results.is_some());
    context.insert("results", &results.unwrap_or_default());
    context.insert("query", &params.q);

    render("home.html", &context)
}

#[instrument(skip(state, admin))]
pub async fn search_page(
    State(state): State<AppState>,
    MaybeAdmin(admin): MaybeAdmin,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, PageError> {
    let mut context = page_context(&state, admin.is_some()).await?;

    let results = search_cards(&state, &params.q).await?;
    context.insert("searched", &results.is_some());
    context.insert("results", &results.unwrap_or_default());
    context.insert("query", &params.q);

    render("search.html", &context)
}

#[instrument(skip(state, admin))]
pub async fn asset_library(
    State(state): State<AppState>,
    MaybeAdmin(admin): MaybeAdmin,
    Query(query): Query<AssetLibraryQuery>,
) -> Result<Html<String>, PageError> {
    let types: Vec<String> = asset::Entity::find()
        .select_only()
        .column(asset::Column::MimeType)
        .distinct()
        .order_by_asc(asset::Column::MimeType)
        .into_tuple()
        .all(&state.db)
        .await?;

    let mut select = asset::Entity::find();
    if let Some(kind) = query.type_filter() {
        select = select.filter(asset::Column::MimeType.eq(kind));
    }
    let sort = query.sort();
    select = match sort {
        AssetSort::Recent => select.order_by_desc(asset::Column::CreatedAt),
        AssetSort::MostDownloaded => select
            .order_by_desc(asset::Column::DownloadCount)
            .order_by_desc(asset::Column::CreatedAt),
    };
    let rows = select.find_also_related(video::Entity).all(&state.db).await?;

    let mut context = page_context(&state, admin.is_some()).await?;
    context.insert("types", &types);
    context.insert("selected_type", &query.type_filter());
    context.insert("sort", sort.as_param());
    context.insert("assets", &AssetTile::with_videos(&rows, &state.config));

    render("assets.html", &context)
}

#[instrument(skip(state, admin, params))]
pub async fn video_page(
    State(state): State<AppState>,
    MaybeAdmin(admin): MaybeAdmin,
    Path(slug): Path<String>,
    Query(params): Query<VideoPageParams>,
) -> Result<Html<String>, PageError> {
    let video = find_video_by_slug(&state.db, &slug).await?;

    let assets = asset::Entity::find()
        .filter(asset::Column::VideoId.eq(video.id))
        .order_by_desc(asset::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let mut context = page_context(&state, admin.is_some()).await?;
    context.insert("video", &VideoCard::new(&video, &state.config));
    context.insert("assets", &AssetTile::list(&assets, &state.config));
    if admin.is_some() {
        context.insert("edit_href", &format!("/admin/videos/{}/edit", video.id));
    }

    let comments_config = &state.config.comments;
    match comments_config.provider {
        CommentProvider::Builtin => {
            context.insert("comment_provider", "builtin");
            let comments = comment::Entity::find()
                .filter(comment::Column::VideoId.eq(video.id))
                .order_by_desc(comment::Column::CreatedAt)
                .all(&state.db)
                .await?;
            let views: Vec<CommentView> = comments.iter().map(CommentView::from).collect();
            context.insert("comments", &views);

            if let Some(status) = params.comment.as_deref().and_then(CommentStatus::from_code) {
                let flash = if status.is_error() {
                    Flash::error(status.message())
                } else {
                    Flash::success(status.message())
                };
                context.insert("flash", &flash);
            }
        }
        CommentProvider::Giscus => {
            context.insert("comment_provider", "giscus");
            context.insert("giscus", &comments_config.giscus);
        }
        CommentProvider::Cusdis => {
            context.insert("comment_provider", "cusdis");
            context.insert("cusdis", &comments_config.cusdis);
            let page_url = format!(
                "{}{}",
                state.config.server.public_url.trim_end_matches('/'),
                video_href(&video.slug)
            );
            context.insert("page_url", &page_url);
        }
    }

    render("video.html", &context)
}

/// Store a visitor comment and redirect back to the video with an outcome code.
#[instrument(skip(state, form))]
pub async fn post_comment(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Form(form): Form<CommentForm>,
) -> Result<Redirect, PageError> {
    let video = find_video_by_slug(&state.db, &slug).await?;

    let status = match validate_comment(&form) {
        Err(status) => status,
        Ok(new) => {
            let model = comment::ActiveModel {
                id: Set(Uuid::now_v7()),
                video_id: Set(video.id),
                name: Set(new.name),
                email: Set(new.email),
                content: Set(new.content),
                created_at: Set(Utc::now()),
            };
            match comment::Entity::insert(model)
                .exec_without_returning(&state.db)
                .await
            {
                Ok(_) => {
                    tracing::info!(video_id = %video.id, "Comment posted");
                    CommentStatus::Posted
                }
                Err(e) => {
                    tracing::error!(video_id = %video.id, "Failed to store comment: {}", e);
                    CommentStatus::Failed
                }
            }
        }
    };

    Ok(Redirect::to(&format!(
        "{}?comment={}#comments",
        video_href(&video.slug),
        status.code()
    )))
}

pub async fn contact_page(
    State(state): State<AppState>,
    MaybeAdmin(admin): MaybeAdmin,
) -> Result<Html<String>, PageError> {
    let mut context = page_context(&state, admin.is_some()).await?;
    context.insert("sent", &false);
    render("contact.html", &context)
}

/// Contact messages are only logged; nothing is stored or forwarded.
pub async fn contact_submit(
    State(state): State<AppState>,
    MaybeAdmin(admin): MaybeAdmin,
    Form(form): Form<ContactForm>,
) -> Result<Html<String>, PageError> {
    tracing::debug!(
        name = %form.name,
        email = %form.email,
        length = form.message.len(),
        "Contact form submitted"
    );
    let mut context = page_context(&state, admin.is_some()).await?;
    context.insert("sent", &true);
    render("contact.html", &context)
}
