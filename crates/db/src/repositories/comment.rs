//! Comment repository.

use std::sync::Arc;

use crate::entities::{Comment, comment};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use wetube_common::{AppError, AppResult};

/// Comment repository for database operations.
#[derive(Clone)]
pub struct CommentRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentRepository {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Comments on a video, newest first.
    pub async fn find_by_video(&self, video_id: &str) -> AppResult<Vec<comment::Model>> {
        Comment::find()
            .filter(comment::Column::VideoId.eq(video_id))
            .order_by_desc(comment::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count comments on a video.
    pub async fn count_by_video(&self, video_id: &str) -> AppResult<u64> {
        Comment::find()
            .filter(comment::Column::VideoId.eq(video_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new comment.
    pub async fn create(&self, model: comment::ActiveModel) -> AppResult<comment::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, Set};

    fn create_test_comment(id: &str, video_id: &str, content: &str) -> comment::Model {
        comment::Model {
            id: id.to_string(),
            video_id: video_id.to_string(),
            user_id: "user1".to_string(),
            content: content.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_video() {
        let c1 = create_test_comment("c2", "v1", "second");
        let c2 = create_test_comment("c1", "v1", "first");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[c1, c2]])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let result = repo.find_by_video("v1").await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].content, "second");
    }

    #[tokio::test]
    async fn test_count_by_video() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(3))
                }]])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let count = repo.count_by_video("v1").await.unwrap();

        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_create() {
        let created = create_test_comment("c1", "v1", "Great video");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[created.clone()]])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let model = comment::ActiveModel {
            id: Set("c1".to_string()),
            video_id: Set("v1".to_string()),
            user_id: Set("user1".to_string()),
            content: Set("Great video".to_string()),
            created_at: Set(created.created_at),
        };
        let result = repo.create(model).await.unwrap();

        assert_eq!(result, created);
    }
}
