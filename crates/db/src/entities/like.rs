//! Like entity (a viewer's like or dislike on a video).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The two mutually exclusive reactions a viewer can hold on a video.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    #[sea_orm(string_value = "like")]
    Like,
    #[sea_orm(string_value = "dislike")]
    Dislike,
}

impl ReactionKind {
    /// The stored tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}


/// At most one row exists per (video, user): the pair is the primary key.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "likes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub video_id: String,

    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,

    #[sea_orm(column_name = "type")]
    pub kind: ReactionKind,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::video::Entity",
        from = "Column::VideoId",
        to = "super::video::Column::Id",
        on_delete = "Cascade"
    )]
    Video,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::video::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Video.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_kind_tags() {
        assert_eq!(ReactionKind::Like.as_str(), "like");
        assert_eq!(ReactionKind::Dislike.as_str(), "dislike");
        assert_eq!(
            serde_json::from_str::<ReactionKind>(r#""dislike""#).ok(),
            Some(ReactionKind::Dislike)
        );
        assert!(serde_json::from_str::<ReactionKind>(r#""love""#).is_err());
    }
}
