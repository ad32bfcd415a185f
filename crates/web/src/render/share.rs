//! Client-side share button.
//!
//! Copying runs entirely in the browser. The server only renders the
//! clipboard write and the toasts that report how it went.

use wetube_common::AppResult;
use wetube_core::{ActionOutcome, Clipboard, Notice, VideoPage};

use super::html_escape;

/// Clipboard that records writes as a browser script.
#[derive(Debug, Default)]
pub struct ScriptClipboard {
    script: Option<String>,
}

impl ScriptClipboard {
    /// Script performing the last write. It evaluates to a promise.
    #[must_use]
    pub fn into_script(self) -> Option<String> {
        self.script
    }
}

impl Clipboard for ScriptClipboard {
    fn write_text(&mut self, text: &str) -> AppResult<()> {
        self.script = Some(format!("navigator.clipboard.writeText({})", js_string(text)));
        Ok(())
    }
}

/// Share button copying the page's canonical link under `public_url`.
#[must_use]
pub fn share_button(page: &VideoPage, public_url: &str) -> String {
    let url = page.canonical_url(public_url);
    let mut clipboard = ScriptClipboard::default();
    let (outcome, notice) = page.share(&url, &mut clipboard);

    let onclick = match (outcome, clipboard.into_script()) {
        (ActionOutcome::Applied, Some(write)) => format!(
            "{write}.then(function () {{ {} }}, function () {{ {} }});",
            toast_call(&notice),
            toast_call(&Notice::copy_failed()),
        ),
        _ => format!("{};", toast_call(&notice)),
    };

    format!(
        "<button type=\"button\" class=\"share\" data-url=\"{}\" onclick=\"{}\">Share</button>",
        html_escape(&url),
        html_escape(&onclick),
    )
}

fn toast_call(notice: &Notice) -> String {
    format!(
        "wetubeToast({}, {}, {})",
        js_string(&notice.title),
        js_string(&notice.description),
        notice.is_destructive(),
    )
}

/// JavaScript string literal for `text`, inert inside an HTML document.
fn js_string(text: &str) -> String {
    serde_json::Value::from(text)
        .to_string()
        .replace("</", "<\\/")
}
