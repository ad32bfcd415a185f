//! Listing page controller.

use wetube_db::entities::video;

use super::backend::{BackendService, Session};

/// State behind the video grid.
pub struct ListingPage {
    backend: BackendService,
    viewer: Option<Session>,
    videos: Vec<video::Model>,
    loading: bool,
}

impl ListingPage {
    /// A page that has not loaded yet.
    #[must_use]
    pub const fn new(backend: BackendService, viewer: Option<Session>) -> Self {
        Self {
            backend,
            viewer,
            videos: Vec::new(),
            loading: true,
        }
    }

    /// Fetch every video, newest first. Failures leave the grid empty.
    pub async fn load(&mut self) {
        match self.backend.list_videos().await {
            Ok(videos) => {
                tracing::debug!(count = videos.len(), "Loaded video listing");
                self.videos = videos;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load videos");
                self.videos.clear();
            }
        }
        self.loading = false;
    }

    #[must_use]
    pub fn videos(&self) -> &[video::Model] {
        &self.videos
    }

    /// True until the first load resolves.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn viewer(&self) -> Option<&Session> {
        self.viewer.as_ref()
    }

    /// Whether to prompt the viewer to sign in.
    #[must_use]
    pub const fn show_sign_in_banner(&self) -> bool {
        self.viewer.is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};

    use super::*;
    use crate::services::memory_backend::{BackendOp, MemoryBackend};

    fn video_at(id: &str, age_hours: i64) -> video::Model {
        video::Model {
            id: id.to_string(),
            title: format!("Video {id}"),
            description: None,
            thumbnail_url: format!("https://img.example/{id}.jpg"),
            channel_name: "Channel".to_string(),
            channel_avatar_url: None,
            views: 10,
            duration: "3:21".to_string(),
            video_url: format!("https://www.youtube.com/watch?v={id}"),
            created_at: (Utc::now() - Duration::hours(age_hours)).into(),
        }
    }

    #[tokio::test]
    async fn test_load_orders_newest_first() {
        let backend = Arc::new(MemoryBackend::new());
        backend.insert_video(video_at("t3", 30)).await;
        backend.insert_video(video_at("t1", 1)).await;
        backend.insert_video(video_at("t2", 5)).await;

        let mut page = ListingPage::new(backend, None);
        assert!(page.is_loading());

        page.load().await;

        let ids: Vec<_> = page.videos().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["t1", "t2", "t3"]);
        assert!(!page.is_loading());
    }

    #[tokio::test]
    async fn test_load_failure_leaves_list_empty() {
        let backend = Arc::new(MemoryBackend::new());
        backend.insert_video(video_at("t1", 1)).await;
        backend.fail(BackendOp::ListVideos).await;

        let mut page = ListingPage::new(backend, None);
        page.load().await;

        assert!(page.videos().is_empty());
        assert!(!page.is_loading());
    }

    #[tokio::test]
    async fn test_sign_in_banner_follows_viewer() {
        let backend: BackendService = Arc::new(MemoryBackend::new());

        let anonymous = ListingPage::new(backend.clone(), None);
        assert!(anonymous.show_sign_in_banner());

        let signed_in = ListingPage::new(
            backend,
            Some(Session {
                user_id: "u1".to_string(),
                username: "alice".to_string(),
            }),
        );
        assert!(!signed_in.show_sign_in_banner());
        assert_eq!(signed_in.viewer().map(|s| s.username.as_str()), Some("alice"));
    }
}
