//! Handler for link creation.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::json;

use crate::api::dto::{ApiResponse, GenerateRequest, LinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/generate`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "custom_alias": "abc123",
///   "expires_at": "2030-01-01T00:00:00Z"
/// }
/// ```
///
/// `custom_alias` and `expires_at` are optional.
///
/// # Errors
///
/// - 400 on an unreadable body, failed validation, or a taken alias
/// - 500 if no unique alias could be generated or the store fails
pub async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<LinkResponse>>), AppError> {
    let Json(request) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    request.check(Utc::now())?;

    let GenerateRequest {
        url,
        custom_alias,
        expires_at,
    } = request;

    // `check` guarantees presence
    let url = url.unwrap_or_default();

    let link = state
        .link_service
        .create_link(url, custom_alias, expires_at)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "URL created successfully",
            LinkResponse::from(link),
        )),
    ))
}
