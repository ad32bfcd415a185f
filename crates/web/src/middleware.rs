//! Shared state and session middleware.

#![allow(missing_docs)]

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use wetube_common::{Config, config::SessionConfig};
use wetube_core::{BackendService, SessionContext};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendService,
    pub sessions: SessionContext,
    /// Public base URL without a trailing slash.
    pub public_url: String,
    pub session: SessionConfig,
}

impl AppState {
    #[must_use]
    pub fn new(backend: BackendService, sessions: SessionContext, config: &Config) -> Self {
        Self {
            backend,
            sessions,
            public_url: config.server.public_url().to_string(),
            session: config.session.clone(),
        }
    }
}

/// Resolve the viewer for this request.
///
/// A bearer token wins over the session cookie. The resolved session is
/// placed in request extensions for the [`Viewer`](crate::extractors::Viewer)
/// extractor.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = bearer_token(req.headers()).or_else(|| {
        jar.get(&state.session.cookie_name)
            .map(|c| c.value().to_string())
    });

    if let Some(session) = state.sessions.resolve(token.as_deref()).await {
        req.extensions_mut().insert(session);
    }

    next.run(req).await
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}
