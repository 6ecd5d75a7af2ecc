//! Short code resolution for the redirect endpoint.

use std::sync::Arc;

use serde_json::json;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::{Instrument, Span, debug};

use crate::application::services::visit_service::{VisitAccounting, VisitService};
use crate::domain::entities::VisitorInfo;
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;

/// A successfully resolved short code.
#[derive(Debug)]
pub struct Resolution {
    /// Destination to redirect to.
    pub url: String,
    pub link_id: i64,
    /// Background visit accounting for this hit.
    ///
    /// Dropping the handle detaches the task; it stays tracked by the
    /// service's [`TaskTracker`] until it completes.
    pub accounting: JoinHandle<VisitAccounting>,
}

/// Resolves short codes and triggers visit accounting.
///
/// Lookup is the only step on the response path. The counter increment
/// and the visit row are written by a spawned task so a slow or failing
/// store never delays the redirect. Those tasks are spawned on `tracker`,
/// which the server waits on at shutdown before closing the pool.
pub struct RedirectService<L: LinkRepository, V: VisitRepository> {
    link_repository: Arc<L>,
    visit_service: Arc<VisitService<L, V>>,
    tracker: TaskTracker,
    span: Span,
}

impl<L, V> RedirectService<L, V>
where
    L: LinkRepository + 'static,
    V: VisitRepository + 'static,
{
    pub fn new(
        link_repository: Arc<L>,
        visit_service: Arc<VisitService<L, V>>,
        tracker: TaskTracker,
        span: Span,
    ) -> Self {
        Self {
            link_repository,
            visit_service,
            tracker,
            span,
        }
    }

    /// Looks up `code` and schedules accounting for the visit.
    ///
    /// Expiry is not consulted; an expired link still resolves.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code. Nothing is
    /// written in that case.
    /// Returns [`AppError::StoreUnavailable`] if the lookup fails.
    pub async fn resolve(&self, code: &str, visitor: VisitorInfo) -> Result<Resolution, AppError> {
        async move {
            let link = self
                .link_repository
                .find_by_code(code)
                .await?
                .ok_or_else(|| AppError::not_found("url not found", json!({ "code": code })))?;

            debug!(link_id = link.id, code, "Short code resolved");

            let visit_service = Arc::clone(&self.visit_service);
            let link_id = link.id;
            let accounting = self.tracker.spawn(
                async move { visit_service.record_visit(link_id, visitor).await }
                    .instrument(Span::current()),
            );

            Ok(Resolution {
                url: link.url,
                link_id,
                accounting,
            })
        }
        .instrument(self.span.clone())
        .await
    }
}
