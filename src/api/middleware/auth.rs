//! HTTP Basic authentication middleware for the admin surface.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBasic;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Authenticates requests using HTTP Basic credentials.
///
/// # Header Format
///
/// ```text
/// Authorization: Basic base64(username:password)
/// ```
///
/// When no credentials are configured the request passes through untouched.
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Basic` if the header
/// is missing, malformed, or carries the wrong username or password.
///
/// # Example
///
/// ```rust,ignore
/// let admin = Router::new()
///     .route("/", get(index_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(credentials) = st.credentials.as_ref() else {
        return Ok(next.run(req).await);
    };

    let (mut parts, body) = req.into_parts();

    let AuthBasic((username, password)) = AuthBasic::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    if !credentials.verify(&username, password.as_deref().unwrap_or_default()) {
        tracing::warn!(path = %parts.uri.path(), "Rejected admin credentials");
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "Invalid credentials" }),
        ));
    }

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}
