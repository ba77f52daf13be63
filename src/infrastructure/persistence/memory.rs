//! In-memory repository implementations.
//!
//! Mutex-guarded maps with the same atomicity contracts as the PostgreSQL
//! implementations: token redemption is a compare-and-set under one lock,
//! quota increments are single-lock bumps. Used by the test suite and by
//! embedders that do not run a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{DomainQuota, Recipe, SafeRecipe, ShareToken};
use crate::domain::repositories::{
    QuotaRepository, RecipeRepository, SafeRecipeRepository, ShareTokenRepository,
};
use crate::error::AppError;

/// Seedable in-memory recipe store.
#[derive(Default)]
pub struct InMemoryRecipeRepository {
    recipes: Mutex<HashMap<String, Recipe>>,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a recipe.
    pub fn insert(&self, recipe: Recipe) {
        let mut recipes = self.recipes.lock().expect("recipe store mutex poisoned");
        recipes.insert(recipe.id.clone(), recipe);
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Recipe>, AppError> {
        let recipes = self.recipes.lock().expect("recipe store mutex poisoned");
        Ok(recipes.get(id).cloned())
    }
}

/// In-memory safe-recipe store keyed by artifact id, with the logical
/// (`original_recipe_id`, `owner_id`) upsert key enforced on write.
#[derive(Default)]
pub struct InMemorySafeRecipeRepository {
    artifacts: Mutex<HashMap<String, SafeRecipe>>,
}

impl InMemorySafeRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SafeRecipeRepository for InMemorySafeRecipeRepository {
    async fn upsert(&self, safe_recipe: SafeRecipe) -> Result<SafeRecipe, AppError> {
        let mut artifacts = self.artifacts.lock().expect("safe store mutex poisoned");

        // Supersede any prior version for the same recipe/owner pair.
        artifacts.retain(|_, existing| {
            !(existing.original_recipe_id == safe_recipe.original_recipe_id
                && existing.owner_id == safe_recipe.owner_id)
        });
        artifacts.insert(safe_recipe.id.clone(), safe_recipe.clone());

        Ok(safe_recipe)
    }

    async fn find_by_origin(
        &self,
        original_recipe_id: &str,
        owner_id: &str,
    ) -> Result<Option<SafeRecipe>, AppError> {
        let artifacts = self.artifacts.lock().expect("safe store mutex poisoned");
        Ok(artifacts
            .values()
            .find(|safe| {
                safe.original_recipe_id == original_recipe_id && safe.owner_id == owner_id
            })
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<SafeRecipe>, AppError> {
        let artifacts = self.artifacts.lock().expect("safe store mutex poisoned");
        Ok(ids
            .iter()
            .filter_map(|id| artifacts.get(id).cloned())
            .collect())
    }
}

/// In-memory share-token store with an atomic redeem transition.
#[derive(Default)]
pub struct InMemoryShareTokenRepository {
    tokens: Mutex<HashMap<String, ShareToken>>,
}

impl InMemoryShareTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShareTokenRepository for InMemoryShareTokenRepository {
    async fn insert(&self, token: ShareToken) -> Result<(), AppError> {
        let mut tokens = self.tokens.lock().expect("token store mutex poisoned");
        if tokens.contains_key(&token.token) {
            return Err(AppError::conflict(
                "Share token already exists",
                serde_json::json!({}),
            ));
        }
        tokens.insert(token.token.clone(), token);
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<ShareToken>, AppError> {
        let tokens = self.tokens.lock().expect("token store mutex poisoned");
        Ok(tokens.get(token).cloned())
    }

    async fn redeem(
        &self,
        token: &str,
        used_by: &str,
        used_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        // Check and set under one lock: the in-memory equivalent of
        // `UPDATE … WHERE used = FALSE`.
        let mut tokens = self.tokens.lock().expect("token store mutex poisoned");
        match tokens.get_mut(token) {
            Some(stored) if !stored.used => {
                stored.used = true;
                stored.used_at = Some(used_at);
                stored.used_by = Some(used_by.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// In-memory domain-quota store with single-lock increments.
#[derive(Default)]
pub struct InMemoryQuotaRepository {
    quotas: Mutex<HashMap<String, DomainQuota>>,
}

impl InMemoryQuotaRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuotaRepository for InMemoryQuotaRepository {
    async fn find_by_domain(&self, domain: &str) -> Result<Option<DomainQuota>, AppError> {
        let quotas = self.quotas.lock().expect("quota store mutex poisoned");
        Ok(quotas.get(domain).cloned())
    }

    async fn upsert(&self, quota: DomainQuota) -> Result<(), AppError> {
        let mut quotas = self.quotas.lock().expect("quota store mutex poisoned");
        quotas.insert(quota.domain.clone(), quota);
        Ok(())
    }

    async fn increment(&self, domain: &str, now: DateTime<Utc>) -> Result<(), AppError> {
        let mut quotas = self.quotas.lock().expect("quota store mutex poisoned");
        let quota = quotas
            .entry(domain.to_string())
            .or_insert_with(|| DomainQuota::new(domain, now));
        quota.daily_count += 1;
        quota.rolling_count_90d += 1;
        quota.last_import_at = Some(now);
        Ok(())
    }
}
