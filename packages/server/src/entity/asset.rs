use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "asset")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub video_id: Uuid,
    #[sea_orm(belongs_to, from = "video_id", to = "id", on_delete = "Cascade")]
    pub video: HasOne<super::video::Entity>,

    pub name: String,
    /// MIME type of the stored file.
    #[sea_orm(column_name = "type")]
    pub mime_type: String,
    pub blob_url: String,
    #[sea_orm(default_value = 0)]
    pub download_count: i32,

    #[sea_orm(has_many)]
    pub downloads: HasMany<super::download_log::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
