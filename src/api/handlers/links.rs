//! Handlers for link listing, visit history and deletion.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;

use crate::api::dto::{ApiResponse, LinkResponse, ListLinksParams, VisitResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists links, newest first.
///
/// # Endpoint
///
/// `GET /api/links?page=1&offset=100`
///
/// `offset` is the page size (`page_size` works too). Missing, malformed
/// or non-positive values fall back to page 1 and 100 links.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(params): Query<ListLinksParams>,
) -> Result<Json<ApiResponse<Vec<LinkResponse>>>, AppError> {
    let links = state
        .link_service
        .list_links(params.page(), params.page_size())
        .await?;

    let data = links.into_iter().map(LinkResponse::from).collect();

    Ok(Json(ApiResponse::success("links fetched successfully", data)))
}

/// Returns the visit log of a link, newest first.
///
/// # Endpoint
///
/// `GET /api/links/visits/{id}`
///
/// An unknown id yields an empty list.
///
/// # Errors
///
/// Returns 400 Bad Request if `id` is not an integer.
pub async fn link_visits_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<VisitResponse>>>, AppError> {
    let id = parse_link_id(&id)?;

    let visits = state.visit_service.list_for_link(id).await?;
    let data = visits.into_iter().map(VisitResponse::from).collect();

    Ok(Json(ApiResponse::success("visits fetched successfully", data)))
}

/// Deletes a link together with its visits.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Errors
///
/// - 400 if `id` is not an integer
/// - 404 if no link has this id
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_link_id(&id)?;

    state.link_service.delete_link(id).await?;

    Ok(Json(ApiResponse::message("link deleted successfully")))
}

/// Parses a path segment as a link id.
pub(crate) fn parse_link_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| {
        AppError::bad_request("invalid link ID format", json!({ "id": raw }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_link_id() {
        assert_eq!(parse_link_id("42").unwrap(), 42);
        assert!(matches!(
            parse_link_id("abc"),
            Err(AppError::Validation { .. })
        ));
        assert!(parse_link_id("").is_err());
        assert!(parse_link_id("1.5").is_err());
    }
}
