//! PostgreSQL implementation of the domain-quota repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::DomainQuota;
use crate::domain::repositories::QuotaRepository;
use crate::error::AppError;

/// PostgreSQL repository for per-source-domain usage counters.
///
/// [`Self::increment`] is a single upsert with an in-place `+ 1`, so
/// concurrent share batches against the same domain never undercount.
pub struct PgQuotaRepository {
    pool: Arc<PgPool>,
}

impl PgQuotaRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DomainQuotaRow {
    domain: String,
    daily_count: i64,
    daily_reset_at: DateTime<Utc>,
    rolling_count_90d: i64,
    last_import_at: Option<DateTime<Utc>>,
}

impl From<DomainQuotaRow> for DomainQuota {
    fn from(row: DomainQuotaRow) -> Self {
        Self {
            domain: row.domain,
            daily_count: row.daily_count,
            daily_reset_at: row.daily_reset_at,
            rolling_count_90d: row.rolling_count_90d,
            last_import_at: row.last_import_at,
        }
    }
}

#[async_trait]
impl QuotaRepository for PgQuotaRepository {
    async fn find_by_domain(&self, domain: &str) -> Result<Option<DomainQuota>, AppError> {
        let row = sqlx::query_as::<_, DomainQuotaRow>(
            r#"
            SELECT domain, daily_count, daily_reset_at, rolling_count_90d, last_import_at
            FROM domain_quotas
            WHERE domain = $1
            "#,
        )
        .bind(domain)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(DomainQuota::from))
    }

    async fn upsert(&self, quota: DomainQuota) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO domain_quotas
                (domain, daily_count, daily_reset_at, rolling_count_90d, last_import_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (domain) DO UPDATE SET
                daily_count = EXCLUDED.daily_count,
                daily_reset_at = EXCLUDED.daily_reset_at,
                rolling_count_90d = EXCLUDED.rolling_count_90d,
                last_import_at = EXCLUDED.last_import_at
            "#,
        )
        .bind(&quota.domain)
        .bind(quota.daily_count)
        .bind(quota.daily_reset_at)
        .bind(quota.rolling_count_90d)
        .bind(quota.last_import_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn increment(&self, domain: &str, now: DateTime<Utc>) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO domain_quotas
                (domain, daily_count, daily_reset_at, rolling_count_90d, last_import_at)
            VALUES ($1, 1, $2, 1, $2)
            ON CONFLICT (domain) DO UPDATE SET
                daily_count = domain_quotas.daily_count + 1,
                rolling_count_90d = domain_quotas.rolling_count_90d + 1,
                last_import_at = EXCLUDED.last_import_at
            "#,
        )
        .bind(domain)
        .bind(now)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
