pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod mailer;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;
pub mod web;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::config::{AppConfig, CorsConfig};
use crate::mailer::Mailer;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Clipshelf API",
        version = "1.0.0",
        description = "JSON endpoints of the Clipshelf video site"
    ),
    tags(
        (name = "Search", description = "Video search"),
        (name = "Uploads", description = "Brokered client uploads to blob storage"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age))
}

/// Connect to the database, seed it, and open the blob store.
pub async fn build_state(config: AppConfig, mailer: Arc<dyn Mailer>) -> anyhow::Result<AppState> {
    let db = database::init_db(&config.database.url).await?;
    tracing::info!("Database connected and schema synced");

    seed::seed_site_config(&db).await?;
    seed::seed_admin(&db, &config.auth).await?;
    seed::ensure_indexes(&db).await?;

    let blob_store = common::storage::open_store(&config.storage).await?;

    Ok(AppState {
        db,
        config: Arc::new(config),
        blob_store,
        mailer,
    })
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (api_router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes())
        .split_for_parts();

    let config = state.config.clone();

    api_router
        .layer(cors_layer(&config.server.cors))
        .merge(routes::blob_routes(&config))
        .merge(web::router(&config))
        .with_state(state)
        .merge(Scalar::with_url("/scalar", api))
        .layer(TraceLayer::new_for_http())
}
