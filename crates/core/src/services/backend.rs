//! Backend capability.
//!
//! Pages never reach for a global client: they receive a [`BackendService`]
//! exposing exactly the collection operations they need. [`DbBackend`] serves
//! it from `PostgreSQL`; `MemoryBackend` serves it in-process for tests.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, Set};
use wetube_common::{AppResult, IdGenerator};
use wetube_db::{
    entities::{ReactionKind, comment, user, video},
    repositories::{CommentRepository, LikeRepository, UserRepository, VideoRepository},
};

/// The authenticated viewer behind a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub username: String,
}

impl From<user::Model> for Session {
    fn from(user: user::Model) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
        }
    }
}

/// A comment to insert. `content` is stored as given.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub video_id: String,
    pub user_id: String,
    pub content: String,
}

/// Collection operations over `videos`, `comments` and `likes`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// All videos, newest first.
    async fn list_videos(&self) -> AppResult<Vec<video::Model>>;

    /// A single video.
    async fn find_video(&self, id: &str) -> AppResult<Option<video::Model>>;

    /// Add one to a video's view counter in a single store operation.
    async fn increment_views(&self, id: &str) -> AppResult<()>;

    /// Comments on a video, newest first.
    async fn list_comments(&self, video_id: &str) -> AppResult<Vec<comment::Model>>;

    /// Number of comments on a video.
    async fn count_comments(&self, video_id: &str) -> AppResult<u64>;

    /// Insert a comment and return the stored row.
    async fn insert_comment(&self, input: NewComment) -> AppResult<comment::Model>;

    /// The reaction tag of every like row on a video.
    async fn list_reactions(&self, video_id: &str) -> AppResult<Vec<ReactionKind>>;

    /// A viewer's own reaction on a video.
    async fn find_reaction(&self, video_id: &str, user_id: &str)
    -> AppResult<Option<ReactionKind>>;

    /// Set a viewer's reaction, replacing any prior one.
    async fn upsert_reaction(
        &self,
        video_id: &str,
        user_id: &str,
        kind: ReactionKind,
    ) -> AppResult<()>;

    /// Remove a viewer's reaction.
    async fn delete_reaction(&self, video_id: &str, user_id: &str) -> AppResult<()>;
}

/// Session lookup.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// The session a token belongs to, if any.
    async fn session_for_token(&self, token: &str) -> AppResult<Option<Session>>;
}

/// Shared backend handle.
pub type BackendService = Arc<dyn Backend>;

/// Shared auth backend handle.
pub type AuthBackendService = Arc<dyn AuthBackend>;

/// Backend over the `PostgreSQL` repositories.
#[derive(Clone)]
pub struct DbBackend {
    video_repo: VideoRepository,
    comment_repo: CommentRepository,
    like_repo: LikeRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl DbBackend {
    /// Create a backend sharing one connection pool across repositories.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            video_repo: VideoRepository::new(Arc::clone(&db)),
            comment_repo: CommentRepository::new(Arc::clone(&db)),
            like_repo: LikeRepository::new(Arc::clone(&db)),
            user_repo: UserRepository::new(db),
            id_gen: IdGenerator::new(),
        }
    }
}

#[async_trait]
impl Backend for DbBackend {
    async fn list_videos(&self) -> AppResult<Vec<video::Model>> {
        self.video_repo.find_latest().await
    }

    async fn find_video(&self, id: &str) -> AppResult<Option<video::Model>> {
        self.video_repo.find_by_id(id).await
    }

    async fn increment_views(&self, id: &str) -> AppResult<()> {
        self.video_repo.increment_views(id).await
    }

    async fn list_comments(&self, video_id: &str) -> AppResult<Vec<comment::Model>> {
        self.comment_repo.find_by_video(video_id).await
    }

    async fn count_comments(&self, video_id: &str) -> AppResult<u64> {
        self.comment_repo.count_by_video(video_id).await
    }

    async fn insert_comment(&self, input: NewComment) -> AppResult<comment::Model> {
        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            video_id: Set(input.video_id),
            user_id: Set(input.user_id),
            content: Set(input.content),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.comment_repo.create(model).await
    }

    async fn list_reactions(&self, video_id: &str) -> AppResult<Vec<ReactionKind>> {
        self.like_repo.find_kinds_by_video(video_id).await
    }

    async fn find_reaction(
        &self,
        video_id: &str,
        user_id: &str,
    ) -> AppResult<Option<ReactionKind>> {
        Ok(self
            .like_repo
            .find_by_video_and_user(video_id, user_id)
            .await?
            .map(|row| row.kind))
    }

    async fn upsert_reaction(
        &self,
        video_id: &str,
        user_id: &str,
        kind: ReactionKind,
    ) -> AppResult<()> {
        self.like_repo.upsert(video_id, user_id, kind).await
    }

    async fn delete_reaction(&self, video_id: &str, user_id: &str) -> AppResult<()> {
        self.like_repo.delete_by_video_and_user(video_id, user_id).await
    }
}

#[async_trait]
impl AuthBackend for DbBackend {
    async fn session_for_token(&self, token: &str) -> AppResult<Option<Session>> {
        Ok(self.user_repo.find_by_token(token).await?.map(Session::from))
    }
}
