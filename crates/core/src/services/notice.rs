//! Transient user-facing notifications.

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoticeVariant {
    #[default]
    Default,
    Destructive,
}

/// A toast shown once after a page action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    /// An informational notice.
    #[must_use]
    pub fn info(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: NoticeVariant::Default,
        }
    }

    /// An error notice.
    #[must_use]
    pub fn destructive(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: NoticeVariant::Destructive,
        }
    }

    #[must_use]
    pub fn sign_in_to_like() -> Self {
        Self::destructive("Please sign in", "You need to be signed in to like videos")
    }

    #[must_use]
    pub fn sign_in_to_comment() -> Self {
        Self::destructive("Please sign in", "You need to be signed in to comment")
    }

    #[must_use]
    pub fn video_not_found() -> Self {
        Self::destructive("Error", "Video not found")
    }

    #[must_use]
    pub fn like_failed() -> Self {
        Self::destructive("Error", "Failed to update like status")
    }

    #[must_use]
    pub fn comment_added() -> Self {
        Self::info("Comment added", "Your comment has been posted successfully")
    }

    #[must_use]
    pub fn comment_failed() -> Self {
        Self::destructive("Error", "Failed to post comment")
    }

    #[must_use]
    pub fn comment_too_long() -> Self {
        Self::destructive(
            "Comment too long",
            "Comments are limited to 10,000 characters",
        )
    }

    #[must_use]
    pub fn link_copied() -> Self {
        Self::info("Link copied", "Video link copied to clipboard")
    }

    #[must_use]
    pub fn copy_failed() -> Self {
        Self::destructive("Error", "Failed to copy link")
    }

    /// Whether this notice reports a failure.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }

    /// Short stable name of a canned notice, used to carry it across a
    /// redirect. Ad hoc notices have none.
    #[must_use]
    pub fn key(&self) -> Option<&'static str> {
        CANNED
            .iter()
            .find(|(_, make)| make() == *self)
            .map(|(key, _)| *key)
    }

    /// The canned notice named `key`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        CANNED
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, make)| make())
    }
}

const CANNED: &[(&str, fn() -> Notice)] = &[
    ("sign-in-to-like", Notice::sign_in_to_like),
    ("sign-in-to-comment", Notice::sign_in_to_comment),
    ("video-not-found", Notice::video_not_found),
    ("like-failed", Notice::like_failed),
    ("comment-added", Notice::comment_added),
    ("comment-failed", Notice::comment_failed),
    ("comment-too-long", Notice::comment_too_long),
    ("link-copied", Notice::link_copied),
    ("copy-failed", Notice::copy_failed),
];
