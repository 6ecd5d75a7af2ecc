//! Visit representation returned by the API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Visit;

#[derive(Debug, Clone, Serialize)]
pub struct VisitResponse {
    pub id: i64,
    pub link_id: i64,
    pub ip_address: String,
    pub user_agent: String,
    pub referrer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Visit> for VisitResponse {
    fn from(visit: Visit) -> Self {
        Self {
            id: visit.id,
            link_id: visit.link_id,
            ip_address: visit.ip_address,
            user_agent: visit.user_agent,
            referrer: visit.referrer,
            created_at: visit.created_at,
            updated_at: visit.updated_at,
        }
    }
}
