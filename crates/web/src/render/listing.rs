//! Home page: header, sidebar and the video grid.

use chrono::{DateTime, Utc};
use wetube_core::ListingPage;

use super::{header::header, layout::document, sidebar::sidebar, video_card::video_card};

const SKELETON_CARDS: usize = 8;

/// Render the listing page in whatever state it is in.
#[must_use]
pub fn listing_page(page: &ListingPage, now: DateTime<Utc>) -> String {
    let mut main = String::from("<main class=\"listing\">\n");

    if page.show_sign_in_banner() {
        main.push_str(
            "<div class=\"banner\">Sign in to like videos, comment and more. \
             <a href=\"/auth\">Sign in</a></div>\n",
        );
    }

    if page.is_loading() {
        main.push_str("<div class=\"grid\" aria-busy=\"true\">\n");
        for _ in 0..SKELETON_CARDS {
            main.push_str("<div class=\"skeleton card-skeleton\"></div>\n");
        }
        main.push_str("</div>\n");
    } else if page.videos().is_empty() {
        main.push_str("<p class=\"empty\">No videos yet.</p>\n");
    } else {
        main.push_str("<div class=\"grid\">\n");
        for video in page.videos() {
            main.push_str(&video_card(video, now));
        }
        main.push_str("</div>\n");
    }
    main.push_str("</main>\n");

    let body = format!(
        "{}<div class=\"layout\">\n{}{main}</div>\n",
        header(page.viewer()),
        sidebar("Home")
    );
    document("WeTube", &body, &[])
}
