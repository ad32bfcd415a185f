//! Like repository.

use std::sync::Arc;

use crate::entities::{Like, ReactionKind, like};
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Insert, QueryFilter, QuerySelect, Set,
    sea_query::OnConflict,
};
use wetube_common::{AppError, AppResult};

/// Like repository for database operations.
#[derive(Clone)]
pub struct LikeRepository {
    db: Arc<DatabaseConnection>,
}

impl LikeRepository {
    /// Create a new like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Reaction tags of every row on a video.
    pub async fn find_kinds_by_video(&self, video_id: &str) -> AppResult<Vec<ReactionKind>> {
        Like::find()
            .select_only()
            .column(like::Column::Kind)
            .filter(like::Column::VideoId.eq(video_id))
            .into_tuple::<ReactionKind>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the row for a (video, user) pair.
    pub async fn find_by_video_and_user(
        &self,
        video_id: &str,
        user_id: &str,
    ) -> AppResult<Option<like::Model>> {
        Like::find_by_id((video_id.to_string(), user_id.to_string()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Set the reaction for a (video, user) pair, replacing any prior one.
    pub async fn upsert(&self, video_id: &str, user_id: &str, kind: ReactionKind) -> AppResult<()> {
        upsert_query(video_id, user_id, kind)
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete the row for a (video, user) pair, if any.
    pub async fn delete_by_video_and_user(&self, video_id: &str, user_id: &str) -> AppResult<()> {
        Like::delete_many()
            .filter(like::Column::VideoId.eq(video_id))
            .filter(like::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

fn upsert_query(video_id: &str, user_id: &str, kind: ReactionKind) -> Insert<like::ActiveModel> {
    let model = like::ActiveModel {
        video_id: Set(video_id.to_string()),
        user_id: Set(user_id.to_string()),
        kind: Set(kind),
        created_at: Set(Utc::now().into()),
    };

    Like::insert(model).on_conflict(
        OnConflict::columns([like::Column::VideoId, like::Column::UserId])
            .update_column(like::Column::Kind)
            .to_owned(),
    )
}
