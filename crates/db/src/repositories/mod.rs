//! Repositories, one per collection.

pub mod comment;
pub mod like;
pub mod user;
pub mod video;

pub use comment::CommentRepository;
pub use like::LikeRepository;
pub use user::UserRepository;
pub use video::VideoRepository;
