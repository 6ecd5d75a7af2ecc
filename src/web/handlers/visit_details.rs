//! Visit history page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::domain::entities::{Link, Visit};
use crate::error::AppError;
use crate::state::AppState;

/// Template for the visit history of one link.
#[derive(Template, WebTemplate)]
#[template(path = "visit_details.html")]
pub struct VisitDetailsTemplate {
    pub title: String,
    pub show_back_button: bool,
    pub link: Link,
    pub expired: bool,
    pub visits: Vec<Visit>,
}

/// Plain-text failures of HTML pages.
#[derive(Debug)]
pub enum PageError {
    InvalidId,
    NotFound,
    Internal,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::InvalidId => (StatusCode::BAD_REQUEST, "Invalid Link ID").into_response(),
            PageError::NotFound => (StatusCode::NOT_FOUND, "Link not found").into_response(),
            PageError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Error fetching link details").into_response()
            }
        }
    }
}

impl From<AppError> for PageError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::NotFound { .. } => PageError::NotFound,
            other => {
                error!(error = %other, "Failed to load visit details");
                PageError::Internal
            }
        }
    }
}

/// Renders the visit table for a link.
///
/// # Endpoint
///
/// `GET /links/visits/{id}`
///
/// # Errors
///
/// - 400 `Invalid Link ID` for a non-integer id
/// - 404 `Link not found` for an unknown link
pub async fn visit_details_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<VisitDetailsTemplate, PageError> {
    let id: i64 = id.parse().map_err(|_| {
        warn!(id = %id, "Invalid link id on visit details page");
        PageError::InvalidId
    })?;

    let link = state.link_service.get_link(id).await?;
    let visits = state.visit_service.list_for_link(id).await?;

    Ok(VisitDetailsTemplate {
        title: format!("Visit Details for - {}", link.url),
        show_back_button: true,
        expired: link.is_expired(),
        link,
        visits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_page_error_status() {
        assert_eq!(
            PageError::InvalidId.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PageError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_app_error_mapping() {
        assert!(matches!(
            PageError::from(AppError::not_found("link not found", Value::Null)),
            PageError::NotFound
        ));
        assert!(matches!(
            PageError::from(AppError::store_unavailable("Database error", Value::Null)),
            PageError::Internal
        ));
    }
}
