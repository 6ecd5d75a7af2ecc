//! Visit entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// A recorded redirect against a link.
///
/// Client fields hold whatever the inbound request carried; a missing
/// header is stored as an empty string.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Visit {
    pub id: i64,
    pub link_id: i64,
    pub ip_address: String,
    pub user_agent: String,
    pub referrer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client metadata harvested from a redirect request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorInfo {
    pub ip_address: String,
    pub user_agent: String,
    pub referrer: String,
}

impl VisitorInfo {
    /// Builds visitor info, mapping absent values to empty strings.
    pub fn new(ip_address: Option<String>, user_agent: Option<&str>, referrer: Option<&str>) -> Self {
        Self {
            ip_address: ip_address.unwrap_or_default(),
            user_agent: user_agent.unwrap_or_default().to_string(),
            referrer: referrer.unwrap_or_default().to_string(),
        }
    }
}

/// Input data for appending a visit row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisit {
    pub link_id: i64,
    pub ip_address: String,
    pub user_agent: String,
    pub referrer: String,
}

impl NewVisit {
    pub fn from_visitor(link_id: i64, visitor: VisitorInfo) -> Self {
        Self {
            link_id,
            ip_address: visitor.ip_address,
            user_agent: visitor.user_agent,
            referrer: visitor.referrer,
        }
    }
}
