use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only record of a single asset download.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "download_log")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub asset_id: Uuid,
    #[sea_orm(belongs_to, from = "asset_id", to = "id", on_delete = "Cascade")]
    pub asset: HasOne<super::asset::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
