//! Repository trait for the external recipe store.

use crate::domain::entities::Recipe;
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only view of the recipe store collaborator.
///
/// Recipe CRUD is owned elsewhere; the pipeline only needs to look up the
/// recipes a share request names.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryRecipeRepository`] - seedable store for tests and embedding
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Looks up a recipe by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_id(&self, id: &str) -> Result<Option<Recipe>, AppError>;
}
