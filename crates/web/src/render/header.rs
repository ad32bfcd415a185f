//! Site header with logo, search box and account button.

use wetube_core::Session;

use super::html_escape;

/// Render the sticky site header.
#[must_use]
pub fn header(viewer: Option<&Session>) -> String {
    let account = match viewer {
        Some(session) => format!(
            "<a href=\"/auth\" class=\"account\" title=\"Account\">{}</a>",
            html_escape(&session.username)
        ),
        None => "<a href=\"/auth\" class=\"account\">Sign in</a>".to_string(),
    };

    format!(
        "<header class=\"site-header\">\n\
         <a href=\"/\" class=\"logo\"><span>We</span><span class=\"brand\">Tube</span></a>\n\
         <form class=\"search\" action=\"/\" method=\"get\" role=\"search\">\
         <input type=\"search\" name=\"q\" placeholder=\"Search videos...\">\
         <button type=\"submit\">Search</button></form>\n\
         <nav class=\"actions\">\
         <button type=\"button\" title=\"Create\">Create</button>\
         <button type=\"button\" title=\"Notifications\">Notifications</button>\
         {account}</nav>\n\
         </header>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_anonymous() {
        let html = header(None);
        assert!(html.contains("Search videos..."));
        assert!(html.contains("Sign in"));
    }

    #[test]
    fn test_header_escapes_username() {
        let session = Session {
            user_id: "u1".to_string(),
            username: "<alice>".to_string(),
        };
        let html = header(Some(&session));
        assert!(html.contains("&lt;alice&gt;"));
        assert!(!html.contains("Sign in"));
    }
}
