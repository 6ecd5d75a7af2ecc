//! PostgreSQL implementation of visit repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewVisit, Visit};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

/// PostgreSQL repository for the append-only visit log.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let visit = sqlx::query_as::<_, Visit>(
            r#"
            INSERT INTO visits (link_id, ip_address, user_agent, referrer)
            VALUES ($1, $2, $3, $4)
            RETURNING id, link_id, ip_address, user_agent, referrer, created_at, updated_at
            "#,
        )
        .bind(new_visit.link_id)
        .bind(&new_visit.ip_address)
        .bind(&new_visit.user_agent)
        .bind(&new_visit.referrer)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(visit)
    }

    async fn list_for_link(&self, link_id: i64) -> Result<Vec<Visit>, AppError> {
        let visits = sqlx::query_as::<_, Visit>(
            r#"
            SELECT id, link_id, ip_address, user_agent, referrer, created_at, updated_at
            FROM visits
            WHERE link_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(visits)
    }
}
