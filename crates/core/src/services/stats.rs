//! Per-video aggregate counts.

use wetube_db::entities::ReactionKind;

use super::reaction::ReactionState;

/// Counts shown on the video page. Always recomputed from raw rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VideoStats {
    pub likes: u64,
    pub dislikes: u64,
    pub comments: u64,
    pub viewer_reaction: ReactionState,
}

impl VideoStats {
    /// Derive stats from every reaction tag on the video.
    #[must_use]
    pub fn derive(
        reactions: &[ReactionKind],
        comments: u64,
        viewer_reaction: Option<ReactionKind>,
    ) -> Self {
        let likes = reactions
            .iter()
            .filter(|k| **k == ReactionKind::Like)
            .count() as u64;
        let dislikes = reactions.len() as u64 - likes;

        Self {
            likes,
            dislikes,
            comments,
            viewer_reaction: ReactionState::from_kind(viewer_reaction),
        }
    }
}
