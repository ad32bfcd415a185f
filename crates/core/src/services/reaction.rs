//! Like/dislike toggle state machine.

use wetube_db::entities::ReactionKind;

/// A viewer's reaction on one video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReactionState {
    #[default]
    None,
    Liked,
    Disliked,
}

/// The store operation a toggle requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionChange {
    /// Delete the viewer's reaction row.
    Remove,
    /// Upsert the viewer's reaction row with this kind.
    Set(ReactionKind),
}

impl ReactionState {
    /// State for a stored reaction tag.
    #[must_use]
    pub const fn from_kind(kind: Option<ReactionKind>) -> Self {
        match kind {
            None => Self::None,
            Some(ReactionKind::Like) => Self::Liked,
            Some(ReactionKind::Dislike) => Self::Disliked,
        }
    }

    /// Stored tag for this state.
    #[must_use]
    pub const fn kind(self) -> Option<ReactionKind> {
        match self {
            Self::None => None,
            Self::Liked => Some(ReactionKind::Like),
            Self::Disliked => Some(ReactionKind::Dislike),
        }
    }

    /// Repeating the current reaction clears it; anything else switches to `kind`.
    #[must_use]
    pub fn toggle(self, kind: ReactionKind) -> (Self, ReactionChange) {
        if self.kind() == Some(kind) {
            (Self::None, ReactionChange::Remove)
        } else {
            (Self::from_kind(Some(kind)), ReactionChange::Set(kind))
        }
    }
}
