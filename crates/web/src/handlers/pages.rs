//! Listing and video pages.
//!
//! Action posts answer with a redirect back to the video page and carry
//! their notices in the flash cookie, so a refresh never repeats them.

use axum::{
    Form,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;
use wetube_core::{ListingPage, Notice, Session, VideoPage};
use wetube_db::entities::ReactionKind;

use crate::{
    extractors::Viewer,
    flash,
    middleware::AppState,
    render::{listing::listing_page, not_found::not_found_page, video::video_page},
};

/// Reaction form.
#[derive(Debug, Deserialize)]
pub struct ReactionForm {
    #[serde(rename = "type")]
    pub kind: ReactionKind,
}

/// Comment form.
#[derive(Debug, Deserialize, Validate)]
pub struct CommentForm {
    #[validate(length(max = 10000))]
    pub content: String,
}

/// Home page.
pub async fn index(State(state): State<AppState>, Viewer(viewer): Viewer) -> Html<String> {
    let mut page = ListingPage::new(state.backend.clone(), viewer);
    page.load().await;

    Html(listing_page(&page, Utc::now()))
}

/// Video detail page.
///
/// A plain visit counts one view. Landing here from an action redirect
/// shows that action's notices and counts nothing.
pub async fn video(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Response {
    let (jar, flashed) = flash::take(jar);

    let mut page = VideoPage::new(state.backend.clone(), id, viewer);
    let mut notices = match flashed {
        Some(notices) => {
            page.reload().await;
            notices
        }
        None => {
            page.load().await;
            Vec::new()
        }
    };
    notices.extend(page.take_notices());

    let status = if page.video().is_none() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    let html = video_page(&page, &notices, &state.public_url, Utc::now());
    (status, jar, Html(html)).into_response()
}

/// Toggle a like or dislike.
pub async fn react(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(id): Path<String>,
    jar: CookieJar,
    Form(form): Form<ReactionForm>,
) -> Response {
    let mut page = open(&state, id, viewer).await;

    let outcome = page.react(form.kind).await;
    tracing::debug!(video_id = %page.video_id(), ?outcome, kind = form.kind.as_str(), "Reaction");

    let notices = page.take_notices();
    back_to(&state, &page, jar, &notices)
}

/// Post a comment.
///
/// Oversized input is turned away before the backend is asked anything.
pub async fn comment(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(id): Path<String>,
    jar: CookieJar,
    Form(form): Form<CommentForm>,
) -> Response {
    if form.validate().is_err() {
        tracing::debug!(video_id = %id, len = form.content.chars().count(), "Comment too long");
        let page = VideoPage::new(state.backend.clone(), id, viewer);
        return back_to(&state, &page, jar, &[Notice::comment_too_long()]);
    }

    let mut page = open(&state, id, viewer).await;

    let outcome = page.submit_comment(&form.content).await;
    tracing::debug!(video_id = %page.video_id(), ?outcome, "Comment");

    let notices = page.take_notices();
    back_to(&state, &page, jar, &notices)
}

/// Unknown route.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    tracing::warn!(path = %uri.path(), "No route for path");
    (StatusCode::NOT_FOUND, Html(not_found_page()))
}

/// Refetch the page an action is posted against, dropping load notices
/// the redirect target will raise again on its own.
async fn open(state: &AppState, id: String, viewer: Option<Session>) -> VideoPage {
    let mut page = VideoPage::new(state.backend.clone(), id, viewer);
    page.reload().await;
    page.take_notices();
    page
}

fn back_to(state: &AppState, page: &VideoPage, jar: CookieJar, notices: &[Notice]) -> Response {
    let jar = flash::stash(jar, notices, state.session.cookie_secure);
    let location = format!("/video/{}", urlencoding::encode(page.video_id()));
    (jar, Redirect::to(&location)).into_response()
}
