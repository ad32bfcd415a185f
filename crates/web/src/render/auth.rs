//! Token sign-in form.

use wetube_core::Session;

use super::{header::header, html_escape, layout::document};

/// Render the sign-in page, or the signed-in state with a sign-out button.
#[must_use]
pub fn auth_page(viewer: Option<&Session>, error: Option<&str>) -> String {
    let mut main = String::from("<main class=\"auth\">\n");

    match viewer {
        Some(session) => {
            main.push_str(&format!(
                "<p>Signed in as <strong>{}</strong></p>\n\
                 <form method=\"post\" action=\"/auth/sign-out\">\
                 <button type=\"submit\">Sign out</button></form>\n",
                html_escape(&session.username)
            ));
        }
        None => {
            main.push_str("<h1>Sign in</h1>\n");
            if let Some(error) = error {
                main.push_str(&format!(
                    "<p class=\"error\" role=\"alert\">{}</p>\n",
                    html_escape(error)
                ));
            }
            main.push_str(
                "<form method=\"post\" action=\"/auth\">\
                 <label>Access token <input type=\"password\" name=\"token\" maxlength=\"256\" required></label>\
                 <button type=\"submit\">Sign in</button></form>\n",
            );
        }
    }
    main.push_str("</main>\n");

    let body = format!("{}{main}", header(viewer));
    document("Sign in - WeTube", &body, &[])
}
