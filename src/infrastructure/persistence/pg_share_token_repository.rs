//! PostgreSQL implementation of the share-token repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::ShareToken;
use crate::domain::repositories::ShareTokenRepository;
use crate::error::AppError;

/// PostgreSQL repository for single-use share tokens.
///
/// Redemption is a single `UPDATE … WHERE used = FALSE` checked via
/// `rows_affected`, so two concurrent redeemers can never both win — the
/// database serializes the transition.
pub struct PgShareTokenRepository {
    pool: Arc<PgPool>,
}

impl PgShareTokenRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ShareTokenRow {
    token: String,
    safe_recipe_ids: String,
    sender_id: String,
    scope: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    used: bool,
    used_at: Option<DateTime<Utc>>,
    used_by: Option<String>,
}

impl TryFrom<ShareTokenRow> for ShareToken {
    type Error = AppError;

    fn try_from(row: ShareTokenRow) -> Result<Self, AppError> {
        let safe_recipe_ids: Vec<String> = serde_json::from_str(&row.safe_recipe_ids)
            .map_err(|e| {
                AppError::internal(
                    "Corrupt share token record",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        Ok(ShareToken {
            token: row.token,
            safe_recipe_ids,
            sender_id: row.sender_id,
            scope: row.scope,
            created_at: row.created_at,
            expires_at: row.expires_at,
            used: row.used,
            used_at: row.used_at,
            used_by: row.used_by,
        })
    }
}

#[async_trait]
impl ShareTokenRepository for PgShareTokenRepository {
    async fn insert(&self, token: ShareToken) -> Result<(), AppError> {
        let safe_recipe_ids = serde_json::to_string(&token.safe_recipe_ids)
            .map_err(|e| AppError::internal("Serialization failed", json!({ "reason": e.to_string() })))?;

        sqlx::query(
            r#"
            INSERT INTO share_tokens
                (token, safe_recipe_ids, sender_id, scope, created_at, expires_at, used, used_at, used_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&token.token)
        .bind(&safe_recipe_ids)
        .bind(&token.sender_id)
        .bind(&token.scope)
        .bind(token.created_at)
        .bind(token.expires_at)
        .bind(token.used)
        .bind(token.used_at)
        .bind(&token.used_by)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<ShareToken>, AppError> {
        let row = sqlx::query_as::<_, ShareTokenRow>(
            r#"
            SELECT token, safe_recipe_ids, sender_id, scope, created_at, expires_at, used, used_at, used_by
            FROM share_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ShareToken::try_from).transpose()
    }

    async fn redeem(
        &self,
        token: &str,
        used_by: &str,
        used_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        // The WHERE clause is the compare-and-set: no prior read, no window
        // for a second redeemer to slip through.
        let result = sqlx::query(
            r#"
            UPDATE share_tokens
            SET used = TRUE, used_at = $2, used_by = $3
            WHERE token = $1 AND used = FALSE
            "#,
        )
        .bind(token)
        .bind(used_at)
        .bind(used_by)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
