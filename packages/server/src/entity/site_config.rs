use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Primary key of the single settings row.
pub const SINGLETON_ID: i32 = 1;

pub const DEFAULT_TITLE: &str = "My TikTok Site";
pub const DEFAULT_SUBTITLE: &str = "Welcome!";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    pub site_title: String,
    pub site_subtitle: String,
    pub cover_image_url: Option<String>,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
