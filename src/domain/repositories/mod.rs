//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data
//! access following the Repository pattern. Concrete implementations live in
//! `crate::infrastructure::persistence`.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`RecipeRepository`] - Read access to the external recipe store
//! - [`SafeRecipeRepository`] - Shareable rewritten-recipe artifacts
//! - [`ShareTokenRepository`] - Single-use token persistence and redemption
//! - [`QuotaRepository`] - Per-source-domain usage counters

pub mod quota_repository;
pub mod recipe_repository;
pub mod safe_recipe_repository;
pub mod share_token_repository;

pub use quota_repository::QuotaRepository;
pub use recipe_repository::RecipeRepository;
pub use safe_recipe_repository::SafeRecipeRepository;
pub use share_token_repository::ShareTokenRepository;

#[cfg(test)]
pub use quota_repository::MockQuotaRepository;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
#[cfg(test)]
pub use safe_recipe_repository::MockSafeRecipeRepository;
#[cfg(test)]
pub use share_token_repository::MockShareTokenRepository;
