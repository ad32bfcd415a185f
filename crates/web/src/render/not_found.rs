//! Fallback page for unknown routes.

use super::layout::document;

/// Render the 404 page.
#[must_use]
pub fn not_found_page() -> String {
    let body = "<main class=\"not-found\">\n\
                <h1>404</h1>\n\
                <h2>Page not found</h2>\n\
                <p>The video or page you're looking for doesn't exist or has been removed.</p>\n\
                <a class=\"button\" href=\"/\">Go to Home</a>\n\
                </main>\n";
    document("Page not found - WeTube", body, &[])
}
