//! Link manager page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// Template for the link manager page.
///
/// Renders `templates/index.html`: a creation form and the link table,
/// both driven by `static/js/app.js` against the JSON API.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub show_back_button: bool,
}

/// Renders the link manager page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> impl IntoResponse {
    IndexTemplate {
        title: "Short URL Manager".to_string(),
        show_back_button: false,
    }
}
