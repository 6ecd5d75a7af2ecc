//! Top-level router configuration combining API and page routes.
//!
//! # Route Structure
//!
//! - `GET  /{code}`               - Short link redirect (public)
//! - `GET  /health`               - Health check (public)
//! - `/static/*`                  - Static assets (public)
//! - `GET  /`                     - Link manager page (basic auth)
//! - `GET  /links/visits/{id}`    - Visit history page (basic auth)
//! - `/api/*`                     - JSON API (basic auth)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - HTTP Basic on the admin surface, when configured
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use crate::web;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Builds the router with every route and the tracing layer.
///
/// `static_dir` is served under `/static`.
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    let admin = Router::new()
        .merge(web::routes::protected_routes())
        .nest("/api", api::routes::protected_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .merge(admin)
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(tracing::layer())
}

/// Wraps [`build_router`] with trailing-slash normalization.
///
/// Normalization must run before routing, so it wraps the router from the
/// outside instead of being added with `Router::layer`.
pub fn app_router(state: AppState, static_dir: &str) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, static_dir))
}
