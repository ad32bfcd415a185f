//! HTTP surface for WeTube.
//!
//! Server-rendered pages over the core page controllers:
//!
//! - **Pages**: the video listing, the video detail page and its actions
//! - **Flash**: notices carried from an action post to the page it redirects to
//! - **Auth**: a minimal token sign-in form backed by the session context
//! - **Middleware**: per-request session resolution
//! - **Render**: HTML for the header, sidebar, video cards and pages
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod render;

pub use handlers::router;
pub use middleware::AppState;
