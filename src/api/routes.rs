//! API route configuration.
//!
//! All API endpoints sit behind basic authentication via
//! [`crate::api::middleware::auth`] when credentials are configured.

use crate::api::handlers::{
    delete_link_handler, generate_handler, link_visits_handler, list_links_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Admin JSON API.
///
/// # Endpoints
///
/// - `POST   /generate`            - Create a short link
/// - `GET    /links`               - List links (paginated)
/// - `GET    /links/visits/{id}`   - Visit log of a link
/// - `DELETE /links/{id}`          - Delete a link and its visits
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_handler))
        .route("/links", get(list_links_handler))
        .route("/links/visits/{id}", get(link_visits_handler))
        .route("/links/{id}", delete(delete_link_handler))
}
