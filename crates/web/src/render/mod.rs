//! HTML rendering.
//!
//! Pages are assembled as strings. Every piece of stored or user-supplied
//! text goes through [`html_escape`] before it is interpolated.

pub mod auth;
mod format;
pub mod header;
pub mod layout;
pub mod listing;
pub mod not_found;
pub mod share;
pub mod sidebar;
pub mod video;
pub mod video_card;

pub use format::{compact_views, embed_url, grouped_views, initial, time_ago, user_label};

/// Escape text for use in element content and quoted attributes.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
