//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};

use crate::application::services::link_service::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Query of `GET /api/links`.
///
/// `offset` is the page size; `page_size` is accepted as an alias. Values
/// that do not parse as integers are ignored rather than rejected.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListLinksParams {
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default, alias = "page_size")]
    pub offset: Option<i64>,
}

impl ListLinksParams {
    /// Requested page, 1-indexed.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    /// Requested page size.
    pub fn page_size(&self) -> i64 {
        self.offset.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}
