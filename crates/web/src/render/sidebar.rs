//! Navigation sidebar.

const MAIN_ITEMS: [&str; 4] = ["Home", "Explore", "Shorts", "Subscriptions"];

const LIBRARY_ITEMS: [&str; 5] = [
    "History",
    "Your videos",
    "Watch later",
    "Liked videos",
    "Downloads",
];

/// Render the sidebar with `active` highlighted.
#[must_use]
pub fn sidebar(active: &str) -> String {
    let mut html = String::from("<aside class=\"sidebar\">\n<nav class=\"main\">\n");
    for label in MAIN_ITEMS {
        let class = if label == active { "item active" } else { "item" };
        let href = if label == "Home" { "/" } else { "#" };
        html.push_str(&format!("<a class=\"{class}\" href=\"{href}\">{label}</a>\n"));
    }
    html.push_str("</nav>\n<hr>\n<nav class=\"library\">\n<h3>Library</h3>\n");
    for label in LIBRARY_ITEMS {
        html.push_str(&format!("<a class=\"item\" href=\"#\">{label}</a>\n"));
    }
    html.push_str("</nav>\n<hr>\n<a class=\"item\" href=\"#\">Settings</a>\n</aside>\n");
    html
}
