//! Video entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "videos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub thumbnail_url: String,

    pub channel_name: String,

    #[sea_orm(nullable)]
    pub channel_avatar_url: Option<String>,

    /// View counter, only ever changed by an atomic increment
    #[sea_orm(default_value = 0)]
    pub views: i64,

    /// Display duration such as "15:42"
    pub duration: String,

    /// Playable source URL
    pub video_url: String,

    #[sea_orm(indexed)]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,

    #[sea_orm(has_many = "super::like::Entity")]
    Like,
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Like.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
