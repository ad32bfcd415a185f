//! Page controllers and the capabilities they depend on.

#![allow(missing_docs)]

pub mod backend;
pub mod listing_page;
pub mod memory_backend;
pub mod notice;
pub mod reaction;
pub mod session;
pub mod share;
pub mod stats;
pub mod video_page;

pub use backend::{
    AuthBackend, AuthBackendService, Backend, BackendService, DbBackend, NewComment, Session,
};
pub use listing_page::ListingPage;
pub use memory_backend::{BackendOp, MemoryBackend};
pub use notice::{Notice, NoticeVariant};
pub use reaction::{ReactionChange, ReactionState};
pub use session::{SessionContext, SessionEvent};
pub use share::Clipboard;
pub use stats::VideoStats;
pub use video_page::{ActionOutcome, VideoPage};
