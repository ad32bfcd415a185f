//! Route handlers.

mod auth;
mod pages;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::{AppState, session_middleware};

/// Create the site router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/video/{id}", get(pages::video))
        .route("/video/{id}/reaction", post(pages::react))
        .route("/video/{id}/comments", post(pages::comment))
        .route("/auth", get(auth::form).post(auth::sign_in))
        .route("/auth/sign-out", post(auth::sign_out))
        .fallback(pages::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .with_state(state)
}
