use axum::Json;
use axum::extract::{Query, State};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect};
use tracing::instrument;

use crate::entity::video;
use crate::error::{AppError, ErrorBody};
use crate::models::video::{SearchQuery, VideoResponse};
use crate::state::AppState;
use crate::utils::search::filter_videos;

#[utoipa::path(
    get,
    path = "/search",
    tag = "Search",
    operation_id = "searchVideos",
    summary = "Search videos",
    description = "Returns every video whose title, slug or any tag contains `q` \
        (case-insensitive), newest first. No ranking and no pagination.",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching videos", body = Vec<VideoResponse>),
        (status = 400, description = "Missing or empty `q` (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Database failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(q = ?query.q))]
pub async fn search_videos(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<VideoResponse>>, AppError> {
    let q = query
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Validation("Query parameter is required".into()))?;

    let videos = videos_newest_first(&state.db, None).await?;
    let matches = filter_videos(videos, &q);
    tracing::debug!(count = matches.len(), "Search finished");

    Ok(Json(matches.into_iter().map(VideoResponse::from).collect()))
}

/// Videos ordered by creation time, newest first, optionally capped.
pub async fn videos_newest_first(
    db: &DatabaseConnection,
    limit: Option<u64>,
) -> Result<Vec<video::Model>, DbErr> {
    video::Entity::find()
        .order_by_desc(video::Column::CreatedAt)
        .order_by_desc(video::Column::Id)
        .limit(limit)
        .all(db)
        .await
}
