//! The review page.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../page.html");

/// GET / - Text area, run button and output region.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
