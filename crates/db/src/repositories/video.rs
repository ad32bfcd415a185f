//! Video repository.

use std::sync::Arc;

use crate::entities::{Video, video};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    UpdateMany, sea_query::Expr,
};
use wetube_common::{AppError, AppResult};

/// Video repository for database operations.
#[derive(Clone)]
pub struct VideoRepository {
    db: Arc<DatabaseConnection>,
}

impl VideoRepository {
    /// Create a new video repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a video by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<video::Model>> {
        Video::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a video by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<video::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::VideoNotFound(id.to_string()))
    }

    /// All videos, newest first.
    pub async fn find_latest(&self) -> AppResult<Vec<video::Model>> {
        Video::find()
            .order_by_desc(video::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment the view counter atomically (single UPDATE query, no fetch).
    ///
    /// Concurrent viewers never overwrite each other's increment.
    pub async fn increment_views(&self, id: &str) -> AppResult<()> {
        increment_views_query(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

fn increment_views_query(id: &str) -> UpdateMany<Video> {
    Video::update_many()
        .col_expr(video::Column::Views, Expr::col(video::Column::Views).add(1))
        .filter(video::Column::Id.eq(id))
}
