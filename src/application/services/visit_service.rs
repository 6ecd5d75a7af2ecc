//! Visit accounting service.

use std::sync::Arc;

use tracing::{Instrument, Span, debug, error};

use crate::domain::entities::{NewVisit, Visit, VisitorInfo};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;

/// What the accounting for a single redirect managed to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitAccounting {
    /// The link's `visits_count` was incremented.
    pub counted: bool,
    /// A row was appended to the visit log.
    pub recorded: bool,
}

/// Records visits and exposes the visit log of a link.
///
/// Accounting is best-effort: failures are logged and reported through
/// [`VisitAccounting`], never returned as errors.
pub struct VisitService<L: LinkRepository, V: VisitRepository> {
    link_repository: Arc<L>,
    visit_repository: Arc<V>,
    span: Span,
}

impl<L: LinkRepository, V: VisitRepository> VisitService<L, V> {
    pub fn new(link_repository: Arc<L>, visit_repository: Arc<V>, span: Span) -> Self {
        Self {
            link_repository,
            visit_repository,
            span,
        }
    }

    /// Increments the counter of `link_id` and appends a visit row.
    ///
    /// Both writes run concurrently and independently, so a failed insert
    /// does not undo the increment (and vice versa).
    pub async fn record_visit(&self, link_id: i64, visitor: VisitorInfo) -> VisitAccounting {
        async move {
            let new_visit = NewVisit::from_visitor(link_id, visitor);

            let (increment, insert) = tokio::join!(
                self.link_repository.increment_visits(link_id),
                self.visit_repository.record(new_visit),
            );

            let counted = match increment {
                Ok(()) => true,
                Err(e) => {
                    error!(link_id, error = %e, "Failed to increment visit count");
                    false
                }
            };

            let recorded = match insert {
                Ok(visit) => {
                    debug!(link_id, visit_id = visit.id, "Visit recorded");
                    true
                }
                Err(e) => {
                    error!(link_id, error = %e, "Failed to record visit");
                    false
                }
            };

            VisitAccounting { counted, recorded }
        }
        .instrument(self.span.clone())
        .await
    }

    /// Lists the visits of a link, newest first.
    ///
    /// An unknown link yields an empty list.
    pub async fn list_for_link(&self, link_id: i64) -> Result<Vec<Visit>, AppError> {
        self.visit_repository
            .list_for_link(link_id)
            .instrument(self.span.clone())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockLinkRepository, MockVisitRepository};
    use chrono::Utc;
    use serde_json::Value;

    fn stored_visit(new_visit: NewVisit) -> Visit {
        let now = Utc::now();
        Visit {
            id: 1,
            link_id: new_visit.link_id,
            ip_address: new_visit.ip_address,
            user_agent: new_visit.user_agent,
            referrer: new_visit.referrer,
            created_at: now,
            updated_at: now,
        }
    }

    fn service(
        links: MockLinkRepository,
        visits: MockVisitRepository,
    ) -> VisitService<MockLinkRepository, MockVisitRepository> {
        VisitService::new(Arc::new(links), Arc::new(visits), Span::none())
    }

    #[tokio::test]
    async fn test_record_visit_counts_and_logs() {
        let mut links = MockLinkRepository::new();
        let mut visits = MockVisitRepository::new();

        links
            .expect_increment_visits()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| Ok(()));
        visits
            .expect_record()
            .withf(|v| {
                v.link_id == 5
                    && v.ip_address == "10.0.0.1"
                    && v.user_agent == "curl/8"
                    && v.referrer.is_empty()
            })
            .times(1)
            .returning(|v| Ok(stored_visit(v)));

        let visitor = VisitorInfo::new(Some("10.0.0.1".to_string()), Some("curl/8"), None);
        let outcome = service(links, visits).record_visit(5, visitor).await;

        assert_eq!(
            outcome,
            VisitAccounting {
                counted: true,
                recorded: true
            }
        );
    }

    #[tokio::test]
    async fn test_failed_insert_keeps_increment() {
        let mut links = MockLinkRepository::new();
        let mut visits = MockVisitRepository::new();

        links.expect_increment_visits().times(1).returning(|_| Ok(()));
        visits
            .expect_record()
            .times(1)
            .returning(|_| Err(AppError::store_unavailable("Database error", Value::Null)));

        let outcome = service(links, visits)
            .record_visit(5, VisitorInfo::default())
            .await;

        assert!(outcome.counted);
        assert!(!outcome.recorded);
    }

    #[tokio::test]
    async fn test_failed_increment_still_records() {
        let mut links = MockLinkRepository::new();
        let mut visits = MockVisitRepository::new();

        links
            .expect_increment_visits()
            .times(1)
            .returning(|_| Err(AppError::store_unavailable("Database error", Value::Null)));
        visits
            .expect_record()
            .times(1)
            .returning(|v| Ok(stored_visit(v)));

        let outcome = service(links, visits)
            .record_visit(5, VisitorInfo::default())
            .await;

        assert!(!outcome.counted);
        assert!(outcome.recorded);
    }

    #[tokio::test]
    async fn test_list_for_link_delegates() {
        let links = MockLinkRepository::new();
        let mut visits = MockVisitRepository::new();

        visits
            .expect_list_for_link()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|_| Ok(vec![]));

        let result = service(links, visits).list_for_link(3).await.unwrap();
        assert!(result.is_empty());
    }
}
