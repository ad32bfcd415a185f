//! Clipboard sink for the share action.

use wetube_common::AppResult;

/// Somewhere the share action can put text.
pub trait Clipboard: Send {
    /// Replace the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> AppResult<()>;
}
