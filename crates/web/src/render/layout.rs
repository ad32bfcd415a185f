//! Document shell and notices.

use wetube_core::{Notice, NoticeVariant};

use super::html_escape;

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:#0f0f0f;color:#f1f1f1}\
a{color:inherit;text-decoration:none}\
.toasts{position:fixed;right:1rem;bottom:1rem;display:flex;flex-direction:column;gap:.5rem}\
.toast{background:#272727;border-radius:.5rem;padding:.75rem 1rem;max-width:22rem}\
.toast-destructive{background:#b91c1c}\
.skeleton{background:#272727;border-radius:.5rem;animation:pulse 1.5s infinite}\
@keyframes pulse{50%{opacity:.5}}";

/// Shows a toast from client-side actions.
const TOAST_SCRIPT: &str = "\
function wetubeToast(title, description, destructive) {\
var stack = document.querySelector('.toasts');\
if (!stack) {\
stack = document.createElement('div');\
stack.className = 'toasts';\
stack.setAttribute('role', 'status');\
document.body.appendChild(stack);\
}\
var toast = document.createElement('div');\
toast.className = destructive ? 'toast toast-destructive' : 'toast';\
var heading = document.createElement('strong');\
heading.textContent = title;\
var text = document.createElement('p');\
text.textContent = description;\
toast.append(heading, text);\
stack.appendChild(toast);\
setTimeout(function () { toast.remove(); }, 4000);\
}";

/// Wrap a page body in a full HTML document.
#[must_use]
pub fn document(title: &str, body: &str, notices: &[Notice]) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str(&format!("<style>{STYLE}</style>\n"));
    html.push_str(&format!("<script>{TOAST_SCRIPT}</script>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    html.push_str(&toasts(notices));
    html.push_str("</body>\n</html>\n");
    html
}

/// Notices as a toast stack.
#[must_use]
pub fn toasts(notices: &[Notice]) -> String {
    if notices.is_empty() {
        return String::new();
    }

    let mut html = String::from("<div class=\"toasts\" role=\"status\">\n");
    for notice in notices {
        let class = match notice.variant {
            NoticeVariant::Default => "toast",
            NoticeVariant::Destructive => "toast toast-destructive",
        };
        html.push_str(&format!(
            "<div class=\"{class}\"><strong>{}</strong><p>{}</p></div>\n",
            html_escape(&notice.title),
            html_escape(&notice.description),
        ));
    }
    html.push_str("</div>\n");
    html
}
