//! Web integration tests.
//!
//! These tests drive the full router over an in-memory backend.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use chrono::{Duration, Utc};
use tower::ServiceExt;
use wetube_common::config::{Config, DatabaseConfig, ServerConfig, SessionConfig};
use wetube_core::{BackendOp, MemoryBackend, Session, SessionContext, SessionEvent};
use wetube_db::entities::video;
use wetube_web::{AppState, router};

const TOKEN: &str = "tok-alice";

fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            url: "https://wetube.example/".to_string(),
        },
        database: DatabaseConfig {
            url: "postgres://localhost/test".to_string(),
            max_connections: 10,
            min_connections: 1,
        },
        session: SessionConfig::default(),
    }
}

fn video_at(id: &str, title: &str, age_hours: i64) -> video::Model {
    video::Model {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(format!("About {title}")),
        thumbnail_url: format!("https://img.example/{id}.jpg"),
        channel_name: "Nature Explorer".to_string(),
        channel_avatar_url: None,
        views: 1233,
        duration: "15:42".to_string(),
        video_url: format!("https://www.youtube.com/watch?v={id}"),
        created_at: (Utc::now() - Duration::hours(age_hours)).into(),
    }
}

struct TestApp {
    app: Router,
    backend: Arc<MemoryBackend>,
    sessions: SessionContext,
}

async fn create_test_app() -> TestApp {
    let backend = Arc::new(MemoryBackend::new());
    backend
        .insert_video(video_at("v2", "City Lights at Night", 48))
        .await;
    backend
        .insert_video(video_at("v1", "Mountain Lake Sunset", 1))
        .await;
    backend
        .insert_video(video_at("v3", "Perfect Coffee Brewing", 300))
        .await;
    backend
        .insert_session(
            TOKEN,
            Session {
                user_id: "01j0alice00000000000000000".to_string(),
                username: "alice".to_string(),
            },
        )
        .await;

    let sessions = SessionContext::init(backend.clone());
    let state = AppState::new(backend.clone(), sessions.clone(), &create_test_config());

    TestApp {
        app: router(state),
        backend,
        sessions,
    }
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_index_lists_newest_first() {
    let test = create_test_app().await;

    let response = test.app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    let first = html.find("Mountain Lake Sunset").unwrap();
    let second = html.find("City Lights at Night").unwrap();
    let third = html.find("Perfect Coffee Brewing").unwrap();
    assert!(first < second && second < third);
    assert!(html.contains("1.2K views"));
}

#[tokio::test]
async fn test_index_banner_depends_on_session() {
    let test = create_test_app().await;

    let anonymous = body_text(test.app.clone().oneshot(get("/")).await.unwrap()).await;
    assert!(anonymous.contains("class=\"banner\""));

    let request = Request::builder()
        .uri("/")
        .header(header::COOKIE, format!("wetube_session={TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let signed_in = body_text(test.app.oneshot(request).await.unwrap()).await;
    assert!(!signed_in.contains("class=\"banner\""));
    assert!(signed_in.contains("alice"));
}

#[tokio::test]
async fn test_index_survives_backend_failure() {
    let test = create_test_app().await;
    test.backend.fail(BackendOp::ListVideos).await;
    test.backend.fail(BackendOp::SessionForToken).await;

    let request = Request::builder()
        .uri("/")
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let response = test.app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("No videos yet."));
    assert!(html.contains("class=\"banner\""));
}

#[tokio::test]
async fn test_video_page_counts_each_visit() {
    let test = create_test_app().await;

    let response = test.app.clone().oneshot(get("/video/v1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("1,233 views"));
    assert!(html.contains("https://www.youtube.com/embed/v1"));
    assert!(html.contains("Related videos coming soon"));
    assert!(html.contains("Sign in to leave a comment"));
    assert_eq!(test.backend.stored_video("v1").await.unwrap().views, 1234);

    test.app.oneshot(get("/video/v1")).await.unwrap();
    assert_eq!(test.backend.stored_video("v1").await.unwrap().views, 1235);
}

#[tokio::test]
async fn test_missing_video_returns_not_found_page() {
    let test = create_test_app().await;

    let response = test.app.oneshot(get("/video/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let html = body_text(response).await;
    assert!(html.contains("<h1>Video not found</h1>"));
    assert!(html.contains("Back to Home"));
}

/// Flash cookie pair from a redirect, ready for a `Cookie` header.
fn flash_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("wetube_flash="))
        .and_then(|value| value.split(';').next())
        .unwrap()
        .to_string()
}

/// Follow an action redirect the way a browser would.
async fn follow(app: Router, response: Response<Body>, token: Option<&str>) -> Response<Body> {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let mut builder = Request::builder()
        .uri(location)
        .header(header::COOKIE, flash_cookie(&response));
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
}

#[tokio::test]
async fn test_anonymous_reaction_prompts_sign_in() {
    let test = create_test_app().await;

    let response = test
        .app
        .clone()
        .oneshot(post_form("/video/v1/reaction", "type=like", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(flash_cookie(&response), "wetube_flash=sign-in-to-like");

    let page = follow(test.app, response, None).await;
    assert_eq!(page.status(), StatusCode::OK);
    let html = body_text(page).await;
    assert!(html.contains("You need to be signed in to like videos"));
    assert_eq!(test.backend.reaction_rows("v1").await, 0);
}

#[tokio::test]
async fn test_reaction_toggles() {
    let test = create_test_app().await;

    let response = test
        .app
        .clone()
        .oneshot(post_form("/video/v1/reaction", "type=like", Some(TOKEN)))
        .await
        .unwrap();
    let location = response.headers().get(header::LOCATION).unwrap();
    assert_eq!(location.to_str().unwrap(), "/video/v1");
    assert_eq!(test.backend.reaction_rows("v1").await, 1);

    let page = follow(test.app.clone(), response, Some(TOKEN)).await;
    let html = body_text(page).await;
    assert!(html.contains("aria-pressed=\"true\">Like 1</button>"));

    test.app
        .clone()
        .oneshot(post_form("/video/v1/reaction", "type=like", Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(test.backend.reaction_rows("v1").await, 0);

    // Neither the actions nor the pages they redirect to count views
    assert_eq!(test.backend.stored_video("v1").await.unwrap().views, 1233);
}

#[tokio::test]
async fn test_refreshing_after_reaction_does_not_repeat_it() {
    let test = create_test_app().await;

    let response = test
        .app
        .clone()
        .oneshot(post_form("/video/v1/reaction", "type=like", Some(TOKEN)))
        .await
        .unwrap();
    let flash = flash_cookie(&response);

    for _ in 0..2 {
        let request = Request::builder()
            .uri("/video/v1")
            .header(header::COOKIE, flash.clone())
            .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
            .body(Body::empty())
            .unwrap();
        let page = test.app.clone().oneshot(request).await.unwrap();
        assert_eq!(page.status(), StatusCode::OK);
    }

    assert_eq!(test.backend.calls(BackendOp::UpsertReaction).await, 1);
    assert_eq!(test.backend.calls(BackendOp::DeleteReaction).await, 0);
    assert_eq!(test.backend.reaction_rows("v1").await, 1);
}

#[tokio::test]
async fn test_flash_is_cleared_after_display() {
    let test = create_test_app().await;

    let response = test
        .app
        .clone()
        .oneshot(post_form("/video/v1/reaction", "type=like", None))
        .await
        .unwrap();
    let page = follow(test.app.clone(), response, None).await;

    let cleared = page
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.starts_with("wetube_flash=") && value.contains("Max-Age=0"));
    assert!(cleared);

    let plain = body_text(test.app.oneshot(get("/video/v1")).await.unwrap()).await;
    assert!(!plain.contains("You need to be signed in to like videos"));
}

#[tokio::test]
async fn test_redirect_escapes_video_id() {
    let test = create_test_app().await;

    let response = test
        .app
        .oneshot(post_form("/video/bad%0Aid/reaction", "type=like", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers().get(header::LOCATION).unwrap();
    assert_eq!(location.to_str().unwrap(), "/video/bad%0Aid");
}

#[tokio::test]
async fn test_invalid_reaction_type_is_rejected() {
    let test = create_test_app().await;

    let response = test
        .app
        .oneshot(post_form("/video/v1/reaction", "type=love", Some(TOKEN)))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
    assert_eq!(test.backend.reaction_rows("v1").await, 0);
}

#[tokio::test]
async fn test_comment_is_posted_trimmed() {
    let test = create_test_app().await;

    let response = test
        .app
        .clone()
        .oneshot(post_form(
            "/video/v1/comments",
            "content=++great+%3Cvideo%3E++",
            Some(TOKEN),
        ))
        .await
        .unwrap();
    assert_eq!(flash_cookie(&response), "wetube_flash=comment-added");

    let page = follow(test.app, response, Some(TOKEN)).await;
    assert_eq!(page.status(), StatusCode::OK);
    let html = body_text(page).await;
    assert!(html.contains("<p>great &lt;video&gt;</p>"));
    assert!(html.contains("1 Comments"));
    assert!(html.contains("User 01j0alic"));
    assert!(html.contains("Your comment has been posted successfully"));
}

#[tokio::test]
async fn test_whitespace_comment_is_ignored() {
    let test = create_test_app().await;

    let response = test
        .app
        .oneshot(post_form("/video/v1/comments", "content=+++", Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(flash_cookie(&response), "wetube_flash=");
    assert_eq!(test.backend.calls(BackendOp::InsertComment).await, 0);
}

#[tokio::test]
async fn test_oversized_comment_is_rejected() {
    let test = create_test_app().await;
    let content = "a".repeat(10_001);
    let body = format!("content={content}");

    let response = test
        .app
        .clone()
        .oneshot(post_form("/video/v1/comments", &body, Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(flash_cookie(&response), "wetube_flash=comment-too-long");
    assert_eq!(test.backend.calls(BackendOp::FindVideo).await, 0);
    assert_eq!(test.backend.calls(BackendOp::ListComments).await, 0);

    let page = follow(test.app, response, Some(TOKEN)).await;
    let content_type = page.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/html"));

    let html = body_text(page).await;
    assert!(html.contains("Comments are limited to 10,000 characters"));
    assert!(!html.contains(&content[..100]));
    assert_eq!(test.backend.calls(BackendOp::InsertComment).await, 0);
}

#[tokio::test]
async fn test_share_button_copies_in_the_browser() {
    let test = create_test_app().await;

    let html = body_text(test.app.clone().oneshot(get("/video/v1")).await.unwrap()).await;
    assert!(html.contains(
        "navigator.clipboard.writeText(&quot;https://wetube.example/video/v1&quot;)"
    ));
    assert!(html.contains("wetubeToast(&quot;Link copied&quot;"));
    assert!(html.contains("wetubeToast(&quot;Error&quot;, &quot;Failed to copy link&quot;, true)"));
    assert!(html.contains("function wetubeToast("));

    // Copying never reaches the server
    let response = test
        .app
        .oneshot(post_form("/video/v1/share", "", None))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
    assert_eq!(test.backend.stored_video("v1").await.unwrap().views, 1234);
}

#[tokio::test]
async fn test_sign_in_sets_cookie_and_publishes() {
    let test = create_test_app().await;
    let mut events = test.sessions.subscribe();

    let response = test
        .app
        .oneshot(post_form("/auth", &format!("token={TOKEN}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with(&format!("wetube_session={TOKEN}")));
    assert!(cookie.contains("HttpOnly"));

    assert!(matches!(
        events.recv().await.unwrap(),
        SessionEvent::SignedIn(session) if session.username == "alice"
    ));
}

#[tokio::test]
async fn test_sign_in_with_unknown_token() {
    let test = create_test_app().await;

    let response = test
        .app
        .oneshot(post_form("/auth", "token=wrong", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_text(response).await.contains("Invalid access token"));
}

#[tokio::test]
async fn test_sign_in_with_empty_token_renders_form() {
    let test = create_test_app().await;

    let response = test
        .app
        .oneshot(post_form("/auth", "token=", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/html"));
    let html = body_text(response).await;
    assert!(html.contains("Enter an access token of at most 256 characters"));
    assert!(html.contains("name=\"token\""));
}

#[tokio::test]
async fn test_oversized_token_is_not_echoed() {
    let test = create_test_app().await;
    let token = "x".repeat(300);

    let response = test
        .app
        .oneshot(post_form("/auth", &format!("token={token}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!body_text(response).await.contains(&token));
    assert_eq!(test.backend.calls(BackendOp::SessionForToken).await, 0);
}

#[tokio::test]
async fn test_sign_out_clears_cookie() {
    let test = create_test_app().await;
    let mut events = test.sessions.subscribe();

    let response = test
        .app
        .oneshot(post_form("/auth/sign-out", "", Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("wetube_session="));
    assert!(cookie.contains("Max-Age=0"));

    assert!(matches!(
        events.recv().await.unwrap(),
        SessionEvent::SignedOut(_)
    ));
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let test = create_test_app().await;

    let response = test.app.oneshot(get("/nonexistent")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page not found"));
}
