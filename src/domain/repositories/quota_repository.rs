//! Repository trait for per-source-domain usage counters.

use crate::domain::entities::DomainQuota;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for [`DomainQuota`] records.
///
/// Counter bumps go through [`Self::increment`], which implementations make
/// atomic at the store level (upsert with an in-place `+ 1`) so concurrent
/// share batches against the same domain do not undercount.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgQuotaRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryQuotaRepository`] - in-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuotaRepository: Send + Sync {
    /// Fetches the counter record for a domain, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_domain(&self, domain: &str) -> Result<Option<DomainQuota>, AppError>;

    /// Writes a full record, replacing any existing one for the same domain.
    /// Used to persist a lazy daily-window rollover.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn upsert(&self, quota: DomainQuota) -> Result<(), AppError>;

    /// Atomically bumps both counters for a domain, creating the record on
    /// first encounter, and stamps `last_import_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn increment(&self, domain: &str, now: DateTime<Utc>) -> Result<(), AppError>;
}
