//! Video detail page.

use chrono::{DateTime, Utc};
use wetube_core::{Notice, ReactionState, VideoPage};
use wetube_db::entities::{comment, video};

use super::{
    embed_url, grouped_views, header::header, html_escape, initial, layout::document,
    share::share_button, time_ago, user_label,
};

/// Render the detail page with pending notices. Share links point under
/// `public_url`.
#[must_use]
pub fn video_page(
    page: &VideoPage,
    notices: &[Notice],
    public_url: &str,
    now: DateTime<Utc>,
) -> String {
    let (title, main) = if page.is_loading() {
        ("WeTube".to_string(), skeleton())
    } else {
        match page.video() {
            Some(video) => (format!("{} - WeTube", video.title), details(page, video, public_url, now)),
            None => ("Video not found - WeTube".to_string(), missing()),
        }
    };

    let body = format!("{}{main}", header(page.viewer()));
    document(&title, &body, notices)
}

fn skeleton() -> String {
    "<main class=\"video-page\" aria-busy=\"true\">\n\
     <div class=\"skeleton player-skeleton\"></div>\n\
     <div class=\"skeleton title-skeleton\"></div>\n\
     <div class=\"skeleton meta-skeleton\"></div>\n\
     </main>\n"
        .to_string()
}

fn missing() -> String {
    "<main class=\"video-page not-found\">\n\
     <h1>Video not found</h1>\n\
     <a class=\"button\" href=\"/\">Back to Home</a>\n\
     </main>\n"
        .to_string()
}

fn details(page: &VideoPage, video: &video::Model, public_url: &str, now: DateTime<Utc>) -> String {
    let stats = page.stats();
    let id = html_escape(&video.id);
    let pressed = |state: ReactionState| {
        if stats.viewer_reaction == state {
            "true"
        } else {
            "false"
        }
    };

    let mut html = String::from("<main class=\"video-page\">\n<div class=\"primary\">\n");

    html.push_str(&format!(
        "<div class=\"player\"><iframe src=\"{}\" title=\"{}\" allowfullscreen></iframe></div>\n",
        html_escape(&embed_url(&video.video_url)),
        html_escape(&video.title),
    ));
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&video.title)));

    html.push_str(&format!(
        "<div class=\"owner\"><span class=\"initial\">{}</span>\
         <div><p class=\"channel\">{}</p>\
         <p class=\"meta\">{} views &bull; {}</p></div></div>\n",
        html_escape(&initial(&video.channel_name)),
        html_escape(&video.channel_name),
        grouped_views(video.views),
        time_ago(&video.created_at, now),
    ));

    html.push_str(&format!(
        "<div class=\"reactions\">\
         <form method=\"post\" action=\"/video/{id}/reaction\">\
         <input type=\"hidden\" name=\"type\" value=\"like\">\
         <button type=\"submit\" class=\"like\" aria-pressed=\"{}\">Like {}</button></form>\
         <form method=\"post\" action=\"/video/{id}/reaction\">\
         <input type=\"hidden\" name=\"type\" value=\"dislike\">\
         <button type=\"submit\" class=\"dislike\" aria-pressed=\"{}\">Dislike {}</button></form>\
         {}</div>\n",
        pressed(ReactionState::Liked),
        stats.likes,
        pressed(ReactionState::Disliked),
        stats.dislikes,
        share_button(page, public_url),
    ));

    if let Some(description) = video.description.as_deref().filter(|d| !d.is_empty()) {
        html.push_str(&format!(
            "<div class=\"description\"><p>{}</p></div>\n",
            html_escape(description)
        ));
    }

    html.push_str(&format!(
        "<section class=\"comments\">\n<h2>{} Comments</h2>\n",
        stats.comments
    ));

    if page.viewer().is_some() {
        html.push_str(&format!(
            "<form method=\"post\" action=\"/video/{id}/comments\" class=\"comment-form\">\
             <textarea name=\"content\" placeholder=\"Add a comment...\" required></textarea>\
             <button type=\"submit\">Comment</button>\
             <button type=\"reset\">Cancel</button></form>\n"
        ));
    } else {
        html.push_str(
            "<div class=\"sign-in-card\"><p>Sign in to leave a comment</p>\
             <a class=\"button\" href=\"/auth\">Sign In</a></div>\n",
        );
    }

    for comment in page.comments() {
        html.push_str(&comment_card(comment, now));
    }
    html.push_str("</section>\n</div>\n");

    html.push_str(
        "<aside class=\"related\"><h3>Related Videos</h3>\
         <p>Related videos coming soon...</p></aside>\n",
    );
    html.push_str("</main>\n");
    html
}

fn comment_card(comment: &comment::Model, now: DateTime<Utc>) -> String {
    format!(
        "<article class=\"comment\"><span class=\"initial\">{}</span>\
         <div><p><strong>{}</strong> <span class=\"meta\">{}</span></p>\
         <p>{}</p></div></article>\n",
        html_escape(&initial(&comment.user_id)),
        html_escape(&user_label(&comment.user_id)),
        time_ago(&comment.created_at, now),
        html_escape(&comment.content),
    )
}
