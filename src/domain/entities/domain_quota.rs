//! Per-source-domain import accounting.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Usage counters for one source domain.
///
/// One record per distinct domain, created on first encounter and updated
/// additively. The daily window rolls over lazily on read; the 90-day
/// counter is monotonic with no decay — an accepted simplification of the
/// retention policy, not an oversight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainQuota {
    pub domain: String,
    pub daily_count: i64,
    pub daily_reset_at: DateTime<Utc>,
    pub rolling_count_90d: i64,
    pub last_import_at: Option<DateTime<Utc>>,
}

impl DomainQuota {
    /// A fresh record for a domain first seen at `now`.
    pub fn new(domain: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            domain: domain.into(),
            daily_count: 0,
            daily_reset_at: now,
            rolling_count_90d: 0,
            last_import_at: None,
        }
    }

    /// True when a full 24h window has elapsed since the last daily reset.
    pub fn daily_window_elapsed(&self, now: DateTime<Utc>) -> bool {
        now - self.daily_reset_at >= Duration::hours(24)
    }

    /// Zeroes the daily counter and restarts the 24h window at `now`.
    pub fn roll_daily_window(&mut self, now: DateTime<Utc>) {
        self.daily_count = 0;
        self.daily_reset_at = now;
    }
}
