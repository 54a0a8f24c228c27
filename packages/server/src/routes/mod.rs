use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers::{search, upload};
use crate::state::AppState;

/// JSON API, documented in the OpenAPI spec.
pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(search::search_videos))
        .routes(routes!(upload::handle_upload))
}

/// Blob endpoints of the filesystem backend: direct client uploads and public reads.
pub fn blob_routes(config: &AppConfig) -> Router<AppState> {
    let max_body = usize::try_from(config.storage.max_blob_size)
        .unwrap_or(usize::MAX)
        .saturating_add(1);
    Router::new()
        .route("/blobs/{*key}", get(upload::get_blob).put(upload::put_blob))
        .layer(DefaultBodyLimit::max(max_body))
}
