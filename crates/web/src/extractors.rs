//! Request extractors.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use wetube_core::Session;

/// The signed-in viewer, if any. Set by the session middleware.
#[derive(Debug, Clone)]
pub struct Viewer(pub Option<Session>);

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Session>().cloned()))
    }
}
