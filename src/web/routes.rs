//! Admin page route configuration.

use crate::state::AppState;
use crate::web::handlers::{index_handler, visit_details_handler};
use axum::{Router, routing::get};

/// Admin pages, gated by basic authentication.
///
/// # Endpoints
///
/// - `GET /` - Link manager
/// - `GET /links/visits/{id}` - Visit history of one link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/links/visits/{id}", get(visit_details_handler))
}
