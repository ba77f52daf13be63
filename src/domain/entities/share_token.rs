//! Single-use import token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The only scope issued for share tokens.
pub const PRIVATE_IMPORT_SCOPE: &str = "private-import-only";

/// A single-use, time-boxed credential for importing shared recipes.
///
/// Lifecycle: Active → Redeemed (`used = true`, terminal) or Expired
/// (computed lazily from `expires_at` at access time, never stored). The
/// `used` flag is the one durable write that must be race-free: exactly one
/// concurrent redeemer may win it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareToken {
    /// Opaque URL-safe token with at least 256 bits of entropy.
    pub token: String,
    pub safe_recipe_ids: Vec<String>,
    pub sender_id: String,
    pub scope: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub used_by: Option<String>,
}

impl ShareToken {
    /// Creates an active token expiring at `expires_at`.
    pub fn new(
        token: String,
        safe_recipe_ids: Vec<String>,
        sender_id: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            safe_recipe_ids,
            sender_id,
            scope: PRIVATE_IMPORT_SCOPE.to_string(),
            created_at,
            expires_at,
            used: false,
            used_at: None,
            used_by: None,
        }
    }

    /// Returns true once the expiry instant has been reached.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
