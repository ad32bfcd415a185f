//! Token sign-in.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use validator::Validate;
use wetube_common::{AppError, AppResult};

use crate::{extractors::Viewer, middleware::AppState, render::auth::auth_page};

/// Sign-in form.
#[derive(Debug, Deserialize, Validate)]
pub struct SignInForm {
    #[validate(length(min = 1, max = 256))]
    pub token: String,
}

/// Show the sign-in form.
pub async fn form(Viewer(viewer): Viewer) -> Html<String> {
    Html(auth_page(viewer.as_ref(), None))
}

/// Validate the token and store it in the session cookie.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignInForm>,
) -> AppResult<Response> {
    if form.validate().is_err() {
        tracing::debug!(len = form.token.len(), "Rejected malformed token");
        return Ok((
            StatusCode::BAD_REQUEST,
            Html(auth_page(None, Some("Enter an access token of at most 256 characters"))),
        )
            .into_response());
    }

    match state.sessions.sign_in(&form.token).await {
        Ok(_) => {
            let cookie = Cookie::build((state.session.cookie_name.clone(), form.token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(state.session.cookie_secure);

            Ok((jar.add(cookie), Redirect::to("/")).into_response())
        }
        Err(AppError::Unauthorized) => Ok((
            StatusCode::UNAUTHORIZED,
            Html(auth_page(None, Some("Invalid access token"))),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

/// Clear the session cookie.
pub async fn sign_out(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    jar: CookieJar,
) -> Response {
    if let Some(session) = viewer {
        state.sessions.sign_out(&session);
    }

    let cookie = Cookie::build(state.session.cookie_name.clone()).path("/");
    (jar.remove(cookie), Redirect::to("/")).into_response()
}
