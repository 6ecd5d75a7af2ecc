//! Repository trait for visit records.

use crate::domain::entities::{NewVisit, Visit};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for redirect events.
///
/// Visits are append-only; they disappear only together with their link
/// (see [`crate::domain::repositories::LinkRepository::delete`]).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Appends one visit row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors, including a
    /// foreign key failure when the link was deleted concurrently.
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, AppError>;

    /// Lists the visits of a link, newest first.
    ///
    /// An unknown `link_id` yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn list_for_link(&self, link_id: i64) -> Result<Vec<Visit>, AppError>;
}
