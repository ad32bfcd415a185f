//! Video detail page controller.
//!
//! Owns the fetched copies of one video, its comments and its stats, and
//! runs the viewer's actions against the backend. Every action refetches
//! what it touched instead of patching local state.

use wetube_common::AppResult;
use wetube_db::entities::{ReactionKind, comment, video};

use super::{
    backend::{BackendService, NewComment, Session},
    notice::Notice,
    reaction::ReactionChange,
    share::Clipboard,
    stats::VideoStats,
};

/// Result of a viewer action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action reached the backend and local state was refreshed.
    Applied,
    /// The action needs a signed-in viewer; nothing changed.
    SignInRequired,
    /// The input was empty or there is nothing to act on; nothing changed.
    Ignored,
    /// The backend rejected the action; nothing changed.
    Failed,
}

/// State behind the video detail page.
pub struct VideoPage {
    backend: BackendService,
    video_id: String,
    viewer: Option<Session>,
    video: Option<video::Model>,
    comments: Vec<comment::Model>,
    stats: VideoStats,
    /// Set while `stats` may not reflect the backend, which makes the
    /// viewer's own reaction unknown.
    stats_stale: bool,
    loading: bool,
    notices: Vec<Notice>,
}

impl VideoPage {
    /// A page for `video_id` that has not loaded yet.
    #[must_use]
    pub fn new(
        backend: BackendService,
        video_id: impl Into<String>,
        viewer: Option<Session>,
    ) -> Self {
        Self {
            backend,
            video_id: video_id.into(),
            viewer,
            video: None,
            comments: Vec::new(),
            stats: VideoStats::default(),
            stats_stale: true,
            loading: true,
            notices: Vec::new(),
        }
    }

    /// Fetch the video, its comments and its stats concurrently.
    ///
    /// A found video gets its view counter bumped once per load.
    pub async fn load(&mut self) {
        self.load_with(true).await;
    }

    /// Fetch everything again without counting another view.
    ///
    /// Used when an action is posted against a page the viewer already has open.
    pub async fn reload(&mut self) {
        self.load_with(false).await;
    }

    async fn load_with(&mut self, count_view: bool) {
        let (video, comments, stats) = tokio::join!(
            self.fetch_video(count_view),
            self.fetch_comments(),
            self.fetch_stats()
        );

        match video {
            Ok(Some(video)) => self.video = Some(video),
            Ok(None) => {
                tracing::warn!(video_id = %self.video_id, "Video not found");
                self.video = None;
                self.notices.push(Notice::video_not_found());
            }
            Err(e) => {
                tracing::error!(video_id = %self.video_id, error = %e, "Failed to fetch video");
                self.video = None;
                self.notices.push(Notice::video_not_found());
            }
        }

        match comments {
            Ok(comments) => self.comments = comments,
            Err(e) => {
                tracing::error!(video_id = %self.video_id, error = %e, "Failed to fetch comments");
                self.comments.clear();
            }
        }

        self.apply_stats(stats);
        self.loading = false;
    }

    /// Switch to a different viewer. Reloads when the identity changed.
    pub async fn set_viewer(&mut self, viewer: Option<Session>) -> bool {
        let before = self.viewer.as_ref().map(|s| s.user_id.as_str());
        let after = viewer.as_ref().map(|s| s.user_id.as_str());
        let changed = before != after;

        self.viewer = viewer;
        if changed {
            tracing::debug!(video_id = %self.video_id, "Viewer changed, reloading");
            self.load().await;
        }
        changed
    }

    /// Show a different video, discarding everything fetched for the old one.
    pub async fn navigate(&mut self, video_id: impl Into<String>) {
        self.video_id = video_id.into();
        self.video = None;
        self.comments.clear();
        self.stats = VideoStats::default();
        self.stats_stale = true;
        self.loading = true;
        self.load().await;
    }

    /// Toggle the viewer's like or dislike.
    pub async fn react(&mut self, kind: ReactionKind) -> ActionOutcome {
        let Some(user_id) = self.viewer.as_ref().map(|s| s.user_id.clone()) else {
            self.notices.push(Notice::sign_in_to_like());
            return ActionOutcome::SignInRequired;
        };
        if self.video.is_none() {
            return ActionOutcome::Ignored;
        }
        if self.stats_stale {
            tracing::warn!(video_id = %self.video_id, "Reaction state unknown, refusing to toggle");
            self.notices.push(Notice::like_failed());
            return ActionOutcome::Failed;
        }

        let (_, change) = self.stats.viewer_reaction.toggle(kind);
        let result = match change {
            ReactionChange::Remove => {
                self.backend
                    .delete_reaction(&self.video_id, &user_id)
                    .await
            }
            ReactionChange::Set(kind) => {
                self.backend
                    .upsert_reaction(&self.video_id, &user_id, kind)
                    .await
            }
        };

        if let Err(e) = result {
            tracing::error!(video_id = %self.video_id, error = %e, "Failed to update reaction");
            self.notices.push(Notice::like_failed());
            return ActionOutcome::Failed;
        }

        let stats = self.fetch_stats().await;
        self.apply_stats(stats);
        ActionOutcome::Applied
    }

    /// Post a comment as the viewer. Surrounding whitespace is dropped.
    pub async fn submit_comment(&mut self, content: &str) -> ActionOutcome {
        let Some(user_id) = self.viewer.as_ref().map(|s| s.user_id.clone()) else {
            self.notices.push(Notice::sign_in_to_comment());
            return ActionOutcome::SignInRequired;
        };

        let content = content.trim();
        if content.is_empty() || self.video.is_none() {
            return ActionOutcome::Ignored;
        }

        let input = NewComment {
            video_id: self.video_id.clone(),
            user_id,
            content: content.to_string(),
        };
        if let Err(e) = self.backend.insert_comment(input).await {
            tracing::error!(video_id = %self.video_id, error = %e, "Failed to post comment");
            self.notices.push(Notice::comment_failed());
            return ActionOutcome::Failed;
        }

        let (comments, stats) = tokio::join!(self.fetch_comments(), self.fetch_stats());
        match comments {
            Ok(comments) => self.comments = comments,
            Err(e) => {
                tracing::error!(video_id = %self.video_id, error = %e, "Failed to refetch comments");
            }
        }
        self.apply_stats(stats);

        self.notices.push(Notice::comment_added());
        ActionOutcome::Applied
    }

    /// Copy `url` to the clipboard.
    ///
    /// Never touches the backend or the page state; the caller shows the
    /// returned notice.
    #[must_use]
    pub fn share(&self, url: &str, clipboard: &mut dyn Clipboard) -> (ActionOutcome, Notice) {
        match clipboard.write_text(url) {
            Ok(()) => (ActionOutcome::Applied, Notice::link_copied()),
            Err(e) => {
                tracing::warn!(video_id = %self.video_id, error = %e, "Failed to copy link");
                (ActionOutcome::Failed, Notice::copy_failed())
            }
        }
    }

    /// Canonical address of this page under `public_url`.
    #[must_use]
    pub fn canonical_url(&self, public_url: &str) -> String {
        format!("{}/video/{}", public_url.trim_end_matches('/'), self.video_id)
    }

    #[must_use]
    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    #[must_use]
    pub const fn video(&self) -> Option<&video::Model> {
        self.video.as_ref()
    }

    #[must_use]
    pub fn comments(&self) -> &[comment::Model] {
        &self.comments
    }

    #[must_use]
    pub const fn stats(&self) -> &VideoStats {
        &self.stats
    }

    #[must_use]
    pub const fn viewer(&self) -> Option<&Session> {
        self.viewer.as_ref()
    }

    /// True until the first load resolves.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    async fn fetch_video(&self, count_view: bool) -> AppResult<Option<video::Model>> {
        let video = self.backend.find_video(&self.video_id).await?;

        if count_view && video.is_some() {
            if let Err(e) = self.backend.increment_views(&self.video_id).await {
                tracing::warn!(video_id = %self.video_id, error = %e, "Failed to count view");
            }
        }
        Ok(video)
    }

    async fn fetch_comments(&self) -> AppResult<Vec<comment::Model>> {
        self.backend.list_comments(&self.video_id).await
    }

    async fn fetch_stats(&self) -> AppResult<VideoStats> {
        let viewer_id = self.viewer.as_ref().map(|s| s.user_id.as_str());

        let reactions = self.backend.list_reactions(&self.video_id).await?;
        let comments = self.backend.count_comments(&self.video_id).await?;
        let own = match viewer_id {
            Some(user_id) => self.backend.find_reaction(&self.video_id, user_id).await?,
            None => None,
        };

        Ok(VideoStats::derive(&reactions, comments, own))
    }

    fn apply_stats(&mut self, stats: AppResult<VideoStats>) {
        match stats {
            Ok(stats) => {
                self.stats = stats;
                self.stats_stale = false;
            }
            Err(e) => {
                tracing::error!(video_id = %self.video_id, error = %e, "Failed to fetch stats");
                self.stats_stale = true;
            }
        }
    }
}
