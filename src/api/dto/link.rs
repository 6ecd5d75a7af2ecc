//! Link representation returned by the API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

#[derive(Debug, Clone, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub url: String,
    pub code: String,
    pub visits_count: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            url: link.url,
            code: link.code,
            visits_count: link.visits_count,
            expires_at: link.expires_at,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}
