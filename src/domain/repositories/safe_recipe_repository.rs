//! Repository trait for shareable rewritten recipes.

use crate::domain::entities::SafeRecipe;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for [`SafeRecipe`] artifacts.
///
/// A safe recipe is keyed logically by (`original_recipe_id`, `owner_id`):
/// a fresh share request for the same recipe supersedes the stored artifact
/// rather than accumulating versions.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSafeRecipeRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemorySafeRecipeRepository`] - in-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SafeRecipeRepository: Send + Sync {
    /// Inserts the artifact, replacing any prior version for the same
    /// (`original_recipe_id`, `owner_id`) pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn upsert(&self, safe_recipe: SafeRecipe) -> Result<SafeRecipe, AppError>;

    /// Finds the stored artifact for a recipe/owner pair, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_origin(
        &self,
        original_recipe_id: &str,
        owner_id: &str,
    ) -> Result<Option<SafeRecipe>, AppError>;

    /// Loads artifacts by id. Missing ids are skipped, not errors — a share
    /// token may reference an artifact that was since superseded.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<SafeRecipe>, AppError>;
}
