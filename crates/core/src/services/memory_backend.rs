//! In-process backend.
//!
//! Keeps the same ordering and uniqueness guarantees as the database: videos
//! and comments come back newest first and there is at most one reaction per
//! (video, user) pair. Individual operations can be made to fail.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use wetube_common::{AppError, AppResult, IdGenerator};
use wetube_db::entities::{ReactionKind, comment, video};

use super::backend::{AuthBackend, Backend, NewComment, Session};

/// Operations that can be counted and failed on a [`MemoryBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendOp {
    ListVideos,
    FindVideo,
    IncrementViews,
    ListComments,
    CountComments,
    InsertComment,
    ListReactions,
    FindReaction,
    UpsertReaction,
    DeleteReaction,
    SessionForToken,
}

#[derive(Default)]
struct MemoryState {
    videos: Vec<video::Model>,
    comments: Vec<comment::Model>,
    likes: HashMap<(String, String), ReactionKind>,
    sessions: HashMap<String, Session>,
    failing: HashSet<BackendOp>,
    calls: HashMap<BackendOp, usize>,
}

impl MemoryState {
    fn enter(&mut self, op: BackendOp) -> AppResult<()> {
        *self.calls.entry(op).or_default() += 1;
        if self.failing.contains(&op) {
            return Err(AppError::Database(format!("{op:?} unavailable")));
        }
        Ok(())
    }
}

/// Backend holding every collection in memory.
#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
    id_gen: IdGenerator,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a video record.
    pub async fn insert_video(&self, video: video::Model) {
        self.state.lock().await.videos.push(video);
    }

    /// Register a session token.
    pub async fn insert_session(&self, token: &str, session: Session) {
        self.state
            .lock()
            .await
            .sessions
            .insert(token.to_string(), session);
    }

    /// Make `op` fail until [`Self::recover`] is called.
    pub async fn fail(&self, op: BackendOp) {
        self.state.lock().await.failing.insert(op);
    }

    /// Clear all injected failures.
    pub async fn recover(&self) {
        self.state.lock().await.failing.clear();
    }

    /// How many times `op` was invoked.
    pub async fn calls(&self, op: BackendOp) -> usize {
        self.state
            .lock()
            .await
            .calls
            .get(&op)
            .copied()
            .unwrap_or_default()
    }

    /// How many operations of any kind were invoked.
    pub async fn total_calls(&self) -> usize {
        self.state.lock().await.calls.values().sum()
    }

    /// Current stored copy of a video.
    pub async fn stored_video(&self, id: &str) -> Option<video::Model> {
        self.state
            .lock()
            .await
            .videos
            .iter()
            .find(|v| v.id == id)
            .cloned()
    }

    /// Number of reaction rows on a video.
    pub async fn reaction_rows(&self, video_id: &str) -> usize {
        self.state
            .lock()
            .await
            .likes
            .keys()
            .filter(|(v, _)| v == video_id)
            .count()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list_videos(&self) -> AppResult<Vec<video::Model>> {
        let mut state = self.state.lock().await;
        state.enter(BackendOp::ListVideos)?;

        let mut videos = state.videos.clone();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(videos)
    }

    async fn find_video(&self, id: &str) -> AppResult<Option<video::Model>> {
        let mut state = self.state.lock().await;
        state.enter(BackendOp::FindVideo)?;

        Ok(state.videos.iter().find(|v| v.id == id).cloned())
    }

    async fn increment_views(&self, id: &str) -> AppResult<()> {
        let mut state = self.state.lock().await;
        state.enter(BackendOp::IncrementViews)?;

        if let Some(video) = state.videos.iter_mut().find(|v| v.id == id) {
            video.views += 1;
        }
        Ok(())
    }

    async fn list_comments(&self, video_id: &str) -> AppResult<Vec<comment::Model>> {
        let mut state = self.state.lock().await;
        state.enter(BackendOp::ListComments)?;

        // Reverse first so equal timestamps keep newest-first after the stable sort
        let mut comments: Vec<_> = state
            .comments
            .iter()
            .rev()
            .filter(|c| c.video_id == video_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn count_comments(&self, video_id: &str) -> AppResult<u64> {
        let mut state = self.state.lock().await;
        state.enter(BackendOp::CountComments)?;

        Ok(state
            .comments
            .iter()
            .filter(|c| c.video_id == video_id)
            .count() as u64)
    }

    async fn insert_comment(&self, input: NewComment) -> AppResult<comment::Model> {
        let mut state = self.state.lock().await;
        state.enter(BackendOp::InsertComment)?;

        let row = comment::Model {
            id: self.id_gen.generate(),
            video_id: input.video_id,
            user_id: input.user_id,
            content: input.content,
            created_at: Utc::now().into(),
        };
        state.comments.push(row.clone());
        Ok(row)
    }

    async fn list_reactions(&self, video_id: &str) -> AppResult<Vec<ReactionKind>> {
        let mut state = self.state.lock().await;
        state.enter(BackendOp::ListReactions)?;

        Ok(state
            .likes
            .iter()
            .filter(|((v, _), _)| v == video_id)
            .map(|(_, kind)| *kind)
            .collect())
    }

    async fn find_reaction(
        &self,
        video_id: &str,
        user_id: &str,
    ) -> AppResult<Option<ReactionKind>> {
        let mut state = self.state.lock().await;
        state.enter(BackendOp::FindReaction)?;

        Ok(state
            .likes
            .get(&(video_id.to_string(), user_id.to_string()))
            .copied())
    }

    async fn upsert_reaction(
        &self,
        video_id: &str,
        user_id: &str,
        kind: ReactionKind,
    ) -> AppResult<()> {
        let mut state = self.state.lock().await;
        state.enter(BackendOp::UpsertReaction)?;

        state
            .likes
            .insert((video_id.to_string(), user_id.to_string()), kind);
        Ok(())
    }

    async fn delete_reaction(&self, video_id: &str, user_id: &str) -> AppResult<()> {
        let mut state = self.state.lock().await;
        state.enter(BackendOp::DeleteReaction)?;

        state
            .likes
            .remove(&(video_id.to_string(), user_id.to_string()));
        Ok(())
    }
}

#[async_trait]
impl AuthBackend for MemoryBackend {
    async fn session_for_token(&self, token: &str) -> AppResult<Option<Session>> {
        let mut state = self.state.lock().await;
        state.enter(BackendOp::SessionForToken)?;

        Ok(state.sessions.get(token).cloned())
    }
}
