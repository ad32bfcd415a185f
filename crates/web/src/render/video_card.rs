//! Video grid card.

use chrono::{DateTime, Utc};
use wetube_db::entities::video;

use super::{compact_views, html_escape, initial, time_ago};

/// Render one card linking to the video's page.
#[must_use]
pub fn video_card(video: &video::Model, now: DateTime<Utc>) -> String {
    let avatar = match &video.channel_avatar_url {
        Some(url) => format!(
            "<img src=\"{}\" alt=\"{}\">",
            html_escape(url),
            html_escape(&video.channel_name)
        ),
        None => format!(
            "<span class=\"initial\">{}</span>",
            html_escape(&initial(&video.channel_name))
        ),
    };

    format!(
        "<a class=\"video-card\" href=\"/video/{id}\">\n\
         <div class=\"thumbnail\"><img src=\"{thumb}\" alt=\"{title}\">\
         <span class=\"duration\">{duration}</span></div>\n\
         <div class=\"info\"><div class=\"avatar\">{avatar}</div>\
         <div class=\"text\"><h3>{title}</h3><p class=\"channel\">{channel}</p>\
         <p class=\"meta\"><span>{views} views</span> &bull; <span>{when}</span></p>\
         </div></div>\n</a>\n",
        id = html_escape(&video.id),
        thumb = html_escape(&video.thumbnail_url),
        title = html_escape(&video.title),
        duration = html_escape(&video.duration),
        channel = html_escape(&video.channel_name),
        views = compact_views(video.views),
        when = time_ago(&video.created_at, now),
    )
}
