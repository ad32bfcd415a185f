//! One-shot notices carried across a redirect.
//!
//! Action posts answer with a redirect back to the page and leave the
//! notices they produced in a short-lived cookie. The next GET drains it.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use wetube_core::Notice;

/// Name of the flash cookie.
pub const FLASH_COOKIE: &str = "wetube_flash";

/// Store `notices` for the next page view.
///
/// The cookie is set even when there is nothing to show, so the next view
/// knows it follows an action.
#[must_use]
pub fn stash(jar: CookieJar, notices: &[Notice], secure: bool) -> CookieJar {
    let keys: Vec<&str> = notices.iter().filter_map(Notice::key).collect();
    if keys.len() < notices.len() {
        tracing::debug!(dropped = notices.len() - keys.len(), "Notice without key not carried");
    }

    let cookie = Cookie::build((FLASH_COOKIE, keys.join(".")))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure);
    jar.add(cookie)
}

/// Drain the flash cookie.
///
/// Returns `None` when the request does not follow an action.
#[must_use]
pub fn take(jar: CookieJar) -> (CookieJar, Option<Vec<Notice>>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let notices = cookie
        .value()
        .split('.')
        .filter(|key| !key.is_empty())
        .filter_map(Notice::from_key)
        .collect();

    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, Some(notices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stash_then_take() {
        let jar = stash(
            CookieJar::new(),
            &[Notice::comment_added(), Notice::like_failed()],
            false,
        );
        assert_eq!(
            jar.get(FLASH_COOKIE).map(|c| c.value()),
            Some("comment-added.like-failed")
        );

        let (jar, notices) = take(jar);
        assert_eq!(
            notices,
            Some(vec![Notice::comment_added(), Notice::like_failed()])
        );
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn test_empty_stash_still_marks_the_redirect() {
        let (_, notices) = take(stash(CookieJar::new(), &[], false));
        assert_eq!(notices, Some(Vec::new()));
    }

    #[test]
    fn test_unknown_keys_are_skipped() {
        let jar = CookieJar::new().add(Cookie::new(FLASH_COOKIE, "bogus.link-copied"));
        let (_, notices) = take(jar);
        assert_eq!(notices, Some(vec![Notice::link_copied()]));
    }

    #[test]
    fn test_no_cookie_means_plain_visit() {
        let (_, notices) = take(CookieJar::new());
        assert!(notices.is_none());
    }
}
