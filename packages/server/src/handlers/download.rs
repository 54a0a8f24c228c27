use axum::extract::{Path, State};
use axum::response::Redirect;
use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{asset, download_log};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::PageError;

/// Count a download, record it, and send the visitor to the file.
///
/// The counter increment and the log insert are independent writes. A failure
/// in either one is logged and the visitor is still redirected.
#[instrument(skip(state))]
pub async fn download_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::NotFound("Asset not found".into()))?;

    let asset = asset::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Asset not found".into()))?;

    if let Err(e) = asset::Entity::update_many()
        .col_expr(
            asset::Column::DownloadCount,
            Expr::col(asset::Column::DownloadCount).add(1),
        )
        .filter(asset::Column::Id.eq(asset.id))
        .exec(&state.db)
        .await
    {
        tracing::warn!(asset_id = %asset.id, "Failed to increment download count: {}", e);
    }

    let entry = download_log::ActiveModel {
        id: Set(Uuid::now_v7()),
        asset_id: Set(asset.id),
        created_at: Set(Utc::now()),
    };
    if let Err(e) = download_log::Entity::insert(entry)
        .exec_without_returning(&state.db)
        .await
    {
        tracing::warn!(asset_id = %asset.id, "Failed to record download: {}", e);
    }

    Ok(Redirect::to(&asset.blob_url))
}
