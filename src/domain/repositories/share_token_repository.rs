//! Repository trait for single-use share tokens.

use crate::domain::entities::ShareToken;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for [`ShareToken`] persistence and redemption.
///
/// The redemption transition is the one safety-critical write in the
/// pipeline: implementations MUST make [`Self::redeem`] a single atomic
/// conditional update (compare-and-set on `used`), never a read followed by
/// a separate write.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShareTokenRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryShareTokenRepository`] - in-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShareTokenRepository: Send + Sync {
    /// Stores a freshly issued token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] on a token value collision.
    /// Returns [`AppError::Internal`] on store errors.
    async fn insert(&self, token: ShareToken) -> Result<(), AppError>;

    /// Fetches a token by its opaque value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_token(&self, token: &str) -> Result<Option<ShareToken>, AppError>;

    /// Atomically transitions `used = false → true`, recording who redeemed
    /// the token and when.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if this call won the transition
    /// - `Ok(false)` if the token was already used (or does not exist)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn redeem(
        &self,
        token: &str,
        used_by: &str,
        used_at: DateTime<Utc>,
    ) -> Result<bool, AppError>;
}
