//! Link creation and retrieval service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{Instrument, Span, debug, error, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{
    MAX_ALIAS_ATTEMPTS, generate_code, is_reserved, validate_custom_code,
};

/// First page when the caller supplies none (or a non-positive one).
pub const DEFAULT_PAGE: i64 = 1;

/// Page size when the caller supplies none (or a non-positive one).
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// Service for creating, listing and deleting short links.
///
/// Owns alias assignment: custom aliases are validated and checked for
/// conflicts, generated aliases are retried on collision up to
/// [`MAX_ALIAS_ATTEMPTS`] times.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    span: Span,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service. All work is recorded under `span`.
    pub fn new(link_repository: Arc<L>, span: Span) -> Self {
        Self {
            link_repository,
            span,
        }
    }

    /// Creates a short link for `url`.
    ///
    /// `url` must already be validated by the caller. A `custom_alias` of
    /// `None` means an alias is generated.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the custom alias is malformed or reserved
    /// - [`AppError::AliasConflict`] if the custom alias is already taken
    /// - [`AppError::AliasExhausted`] if every generated candidate collided
    /// - [`AppError::StoreUnavailable`] on database errors
    pub async fn create_link(
        &self,
        url: String,
        custom_alias: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Link, AppError> {
        async move {
            let link = match custom_alias {
                Some(alias) => self.create_with_custom_alias(url, alias, expires_at).await?,
                None => self.create_with_generated_alias(url, expires_at).await?,
            };

            info!(link_id = link.id, code = %link.code, "Link created");
            Ok(link)
        }
        .instrument(self.span.clone())
        .await
    }

    async fn create_with_custom_alias(
        &self,
        url: String,
        alias: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Link, AppError> {
        validate_custom_code(&alias)?;

        if self.link_repository.find_by_code(&alias).await?.is_some() {
            debug!(code = %alias, "Custom alias already taken");
            return Err(alias_taken(&alias));
        }

        let new_link = NewLink {
            url,
            code: alias.clone(),
            expires_at,
        };

        match self.link_repository.create(new_link).await {
            Ok(link) => Ok(link),
            Err(AppError::DuplicateCode { .. }) => {
                warn!(code = %alias, "Custom alias claimed concurrently");
                Err(alias_taken(&alias))
            }
            Err(e) => Err(e),
        }
    }

    async fn create_with_generated_alias(
        &self,
        url: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Link, AppError> {
        for attempt in 1..=MAX_ALIAS_ATTEMPTS {
            let candidate = generate_code();

            if is_reserved(&candidate)
                || self.link_repository.find_by_code(&candidate).await?.is_some()
            {
                warn!(attempt, code = %candidate, "Generated alias collision");
                continue;
            }

            let new_link = NewLink {
                url: url.clone(),
                code: candidate.clone(),
                expires_at,
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::DuplicateCode { .. }) => {
                    warn!(attempt, code = %candidate, "Generated alias claimed concurrently");
                }
                Err(e) => return Err(e),
            }
        }

        error!(attempts = MAX_ALIAS_ATTEMPTS, "Failed to generate a unique alias");
        Err(AppError::alias_exhausted(
            "Failed to generate unique alias",
            json!({ "attempts": MAX_ALIAS_ATTEMPTS }),
        ))
    }

    /// Retrieves a link by its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get_link(&self, id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_by_id(id)
            .instrument(self.span.clone())
            .await?
            .ok_or_else(|| AppError::not_found("link not found", json!({ "id": id })))
    }

    /// Lists links newest first.
    ///
    /// Non-positive `page` or `page_size` fall back to [`DEFAULT_PAGE`] and
    /// [`DEFAULT_PAGE_SIZE`].
    pub async fn list_links(&self, page: i64, page_size: i64) -> Result<Vec<Link>, AppError> {
        let page = if page > 0 { page } else { DEFAULT_PAGE };
        let page_size = if page_size > 0 { page_size } else { DEFAULT_PAGE_SIZE };

        self.link_repository
            .list(page, page_size)
            .instrument(self.span.clone())
            .await
    }

    /// Counts all stored links.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.link_repository
            .count()
            .instrument(self.span.clone())
            .await
    }

    /// Deletes a link and its visit history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn delete_link(&self, id: i64) -> Result<(), AppError> {
        async move {
            if !self.link_repository.delete(id).await? {
                return Err(AppError::not_found("link not found", json!({ "id": id })));
            }

            info!(link_id = id, "Link deleted");
            Ok(())
        }
        .instrument(self.span.clone())
        .await
    }
}

fn alias_taken(alias: &str) -> AppError {
    AppError::alias_conflict("Custom alias already exists", json!({ "code": alias }))
}
