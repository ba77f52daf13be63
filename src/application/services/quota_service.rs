//! Per-source-domain rate limiting for share creation.

use std::sync::Arc;

use tracing::warn;

use crate::domain::repositories::QuotaRepository;
use crate::error::AppError;
use crate::utils::clock::Clock;

/// Import caps per source domain.
#[derive(Debug, Clone)]
pub struct QuotaPolicy {
    pub max_daily: i64,
    pub max_rolling_90d: i64,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            max_daily: 10,
            max_rolling_90d: 100,
        }
    }
}

/// Tracks how much content from any one source domain gets processed.
///
/// The daily window rolls over lazily when a check observes that 24h have
/// passed — there is no background sweeper. The 90-day counter is monotonic
/// with no decay, matching the retention policy as specified. Recipes with
/// no attributable domain are never limited.
pub struct DomainQuotaLedger<Q: QuotaRepository> {
    repository: Arc<Q>,
    clock: Arc<dyn Clock>,
    policy: QuotaPolicy,
}

impl<Q: QuotaRepository> DomainQuotaLedger<Q> {
    /// Creates a ledger over the given counter store.
    pub fn new(repository: Arc<Q>, clock: Arc<dyn Clock>, policy: QuotaPolicy) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    /// Decides whether another import from `domain` is allowed right now.
    ///
    /// An absent record counts as zero usage. A stale daily window is reset
    /// and persisted before the counters are compared.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` when the import may proceed
    /// - `Ok(false)` when either cap is reached
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn check_and_reserve(&self, domain: &str) -> Result<bool, AppError> {
        if domain.is_empty() {
            return Ok(true);
        }

        let Some(mut quota) = self.repository.find_by_domain(domain).await? else {
            return Ok(true);
        };

        let now = self.clock.now();
        if quota.daily_window_elapsed(now) {
            quota.roll_daily_window(now);
            self.repository.upsert(quota.clone()).await?;
        }

        if quota.daily_count >= self.policy.max_daily {
            warn!(domain, daily_count = quota.daily_count, "daily import cap reached");
            return Ok(false);
        }
        if quota.rolling_count_90d >= self.policy.max_rolling_90d {
            warn!(
                domain,
                rolling_count = quota.rolling_count_90d,
                "90-day import cap reached"
            );
            return Ok(false);
        }

        Ok(true)
    }

    /// Records one successful import from `domain`.
    ///
    /// Called only after the recipe was made compliant and persisted. The
    /// bump is atomic at the store level so concurrent batches against the
    /// same domain do not undercount.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn increment(&self, domain: &str) -> Result<(), AppError> {
        if domain.is_empty() {
            return Ok(());
        }

        self.repository.increment(domain, self.clock.now()).await
    }
}
