use anyhow::anyhow;
use chrono::Utc;
use sea_orm::sea_query::{Index, IndexCreateStatement, OnConflict};
use sea_orm::*;
use tracing::info;

use crate::config::AuthConfig;
use crate::entity::{admin_user, asset, comment, download_log, site_config};
use crate::utils::hash::hash_password;

/// Insert the default settings row if it does not exist yet.
pub async fn seed_site_config(db: &DatabaseConnection) -> Result<(), DbErr> {
    let model = site_config::ActiveModel {
        id: Set(site_config::SINGLETON_ID),
        site_title: Set(site_config::DEFAULT_TITLE.to_string()),
        site_subtitle: Set(site_config::DEFAULT_SUBTITLE.to_string()),
        cover_image_url: Set(None),
        updated_at: Set(Utc::now()),
    };

    let result = site_config::Entity::insert(model)
        .on_conflict(
            OnConflict::column(site_config::Column::Id)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(_) => {
            info!("Seeded default site settings");
            Ok(())
        }
        Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Create the bootstrap admin from configuration when it does not exist.
///
/// An existing account is never modified, so a changed password survives restarts.
pub async fn seed_admin(db: &DatabaseConnection, auth: &AuthConfig) -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (auth.admin_email.as_deref(), auth.admin_password.as_deref())
    else {
        return Ok(());
    };
    let email = email.trim().to_lowercase();
    if email.is_empty() || password.is_empty() {
        tracing::warn!("Bootstrap admin email or password is empty, skipping");
        return Ok(());
    }

    let existing = admin_user::Entity::find()
        .filter(admin_user::Column::Email.eq(&email))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let hash = hash_password(password).map_err(|e| anyhow!("failed to hash admin password: {e}"))?;
    let now = Utc::now();
    let model = admin_user::ActiveModel {
        email: Set(email.clone()),
        password: Set(hash),
        token_version: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = admin_user::Entity::insert(model)
        .on_conflict(
            OnConflict::column(admin_user::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(_) => info!("Created admin account {}", email),
        Err(DbErr::RecordNotInserted) => {}
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

async fn create_index(db: &DatabaseConnection, name: &str, stmt: IndexCreateStatement) {
    let sql = db.get_database_backend().build(&stmt).sql;
    match db.execute_unprepared(&sql).await {
        Ok(_) => info!("Ensured index {} exists", name),
        Err(e) => tracing::warn!("Failed to create index {}: {}", name, e),
    }
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Video page: assets of one video, newest first.
    create_index(
        db,
        "idx_asset_video_created",
        Index::create()
            .if_not_exists()
            .name("idx_asset_video_created")
            .table(asset::Entity)
            .col(asset::Column::VideoId)
            .col(asset::Column::CreatedAt)
            .to_owned(),
    )
    .await;

    // Asset library and dashboard ranking.
    create_index(
        db,
        "idx_asset_download_count",
        Index::create()
            .if_not_exists()
            .name("idx_asset_download_count")
            .table(asset::Entity)
            .col(asset::Column::DownloadCount)
            .to_owned(),
    )
    .await;

    create_index(
        db,
        "idx_comment_video_created",
        Index::create()
            .if_not_exists()
            .name("idx_comment_video_created")
            .table(comment::Entity)
            .col(comment::Column::VideoId)
            .col(comment::Column::CreatedAt)
            .to_owned(),
    )
    .await;

    create_index(
        db,
        "idx_download_log_asset",
        Index::create()
            .if_not_exists()
            .name("idx_download_log_asset")
            .table(download_log::Entity)
            .col(download_log::Column::AssetId)
            .to_owned(),
    )
    .await;

    Ok(())
}
