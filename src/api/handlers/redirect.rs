//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::api::extractors::Visitor;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the link by code
/// 2. Spawn visit accounting (counter increment and visit row)
/// 3. Return 307 Temporary Redirect
///
/// Accounting never delays or fails the redirect; its errors are only logged.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 Internal Server Error if the lookup fails.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
) -> Result<Redirect, AppError> {
    let resolution = state.redirect_service.resolve(&code, visitor).await?;

    Ok(Redirect::temporary(&resolution.url))
}
