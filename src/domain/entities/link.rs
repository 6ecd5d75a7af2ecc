//! Link entity representing a short code to destination URL mapping.

use chrono::{DateTime, Utc};

/// A stored short link with its visit counter.
///
/// Only `visits_count` changes after creation; it is bumped by the store
/// itself, never by read-modify-write in the caller.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub url: String,
    pub code: String,
    pub visits_count: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        url: String,
        code: String,
        visits_count: i64,
        expires_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            url,
            code,
            visits_count,
            expires_at,
            created_at,
            updated_at,
        }
    }

    /// Returns true if the link has passed its expiry time.
    ///
    /// Informational only: redirects do not consult it.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub url: String,
    pub code: String,
    pub expires_at: Option<DateTime<Utc>>,
}
