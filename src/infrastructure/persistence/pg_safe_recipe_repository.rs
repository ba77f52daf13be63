//! PostgreSQL implementation of the safe-recipe repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ComplianceMetrics, IngredientFact, SafeRecipe};
use crate::domain::repositories::SafeRecipeRepository;
use crate::error::AppError;

/// PostgreSQL repository for shareable rewritten recipes.
///
/// List- and metric-valued fields are stored as JSON text; the logical key
/// is the unique (`original_recipe_id`, `owner_id`) pair, which the upsert
/// conflicts on so a fresh share supersedes the stored artifact in place.
pub struct PgSafeRecipeRepository {
    pool: Arc<PgPool>,
}

impl PgSafeRecipeRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SafeRecipeRow {
    id: String,
    original_recipe_id: String,
    owner_id: String,
    title_generic: String,
    ingredients: String,
    servings: i32,
    total_time_minutes: i32,
    method_rewritten: String,
    categories: String,
    adapted_from_domain: Option<String>,
    compliance_metrics: String,
    source_hash: String,
    created_at: DateTime<Utc>,
    user_images: String,
}

fn corrupt(e: impl std::fmt::Display) -> AppError {
    AppError::internal(
        "Corrupt safe recipe record",
        json!({ "reason": e.to_string() }),
    )
}

impl TryFrom<SafeRecipeRow> for SafeRecipe {
    type Error = AppError;

    fn try_from(row: SafeRecipeRow) -> Result<Self, AppError> {
        let ingredients: Vec<IngredientFact> =
            serde_json::from_str(&row.ingredients).map_err(corrupt)?;
        let method_rewritten: Vec<String> =
            serde_json::from_str(&row.method_rewritten).map_err(corrupt)?;
        let categories: Vec<String> = serde_json::from_str(&row.categories).map_err(corrupt)?;
        let compliance_metrics: ComplianceMetrics =
            serde_json::from_str(&row.compliance_metrics).map_err(corrupt)?;
        let user_images: Vec<String> = serde_json::from_str(&row.user_images).map_err(corrupt)?;

        Ok(SafeRecipe {
            id: row.id,
            original_recipe_id: row.original_recipe_id,
            owner_id: row.owner_id,
            title_generic: row.title_generic,
            ingredients,
            servings: row.servings,
            total_time_minutes: row.total_time_minutes.max(0) as u32,
            method_rewritten,
            categories,
            adapted_from_domain: row.adapted_from_domain,
            compliance_metrics,
            source_hash: row.source_hash,
            created_at: row.created_at,
            user_images,
        })
    }
}

const SELECT_COLUMNS: &str = "id, original_recipe_id, owner_id, title_generic, ingredients, \
servings, total_time_minutes, method_rewritten, categories, adapted_from_domain, \
compliance_metrics, source_hash, created_at, user_images";

#[async_trait]
impl SafeRecipeRepository for PgSafeRecipeRepository {
    async fn upsert(&self, safe_recipe: SafeRecipe) -> Result<SafeRecipe, AppError> {
        let ingredients = serde_json::to_string(&safe_recipe.ingredients).map_err(corrupt)?;
        let method_rewritten =
            serde_json::to_string(&safe_recipe.method_rewritten).map_err(corrupt)?;
        let categories = serde_json::to_string(&safe_recipe.categories).map_err(corrupt)?;
        let compliance_metrics =
            serde_json::to_string(&safe_recipe.compliance_metrics).map_err(corrupt)?;
        let user_images = serde_json::to_string(&safe_recipe.user_images).map_err(corrupt)?;

        sqlx::query(
            r#"
            INSERT INTO safe_recipes
                (id, original_recipe_id, owner_id, title_generic, ingredients, servings,
                 total_time_minutes, method_rewritten, categories, adapted_from_domain,
                 compliance_metrics, source_hash, created_at, user_images)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (original_recipe_id, owner_id) DO UPDATE SET
                id = EXCLUDED.id,
                title_generic = EXCLUDED.title_generic,
                ingredients = EXCLUDED.ingredients,
                servings = EXCLUDED.servings,
                total_time_minutes = EXCLUDED.total_time_minutes,
                method_rewritten = EXCLUDED.method_rewritten,
                categories = EXCLUDED.categories,
                adapted_from_domain = EXCLUDED.adapted_from_domain,
                compliance_metrics = EXCLUDED.compliance_metrics,
                source_hash = EXCLUDED.source_hash,
                created_at = EXCLUDED.created_at,
                user_images = EXCLUDED.user_images
            "#,
        )
        .bind(&safe_recipe.id)
        .bind(&safe_recipe.original_recipe_id)
        .bind(&safe_recipe.owner_id)
        .bind(&safe_recipe.title_generic)
        .bind(&ingredients)
        .bind(safe_recipe.servings)
        .bind(safe_recipe.total_time_minutes as i32)
        .bind(&method_rewritten)
        .bind(&categories)
        .bind(&safe_recipe.adapted_from_domain)
        .bind(&compliance_metrics)
        .bind(&safe_recipe.source_hash)
        .bind(safe_recipe.created_at)
        .bind(&user_images)
        .execute(self.pool.as_ref())
        .await?;

        Ok(safe_recipe)
    }

    async fn find_by_origin(
        &self,
        original_recipe_id: &str,
        owner_id: &str,
    ) -> Result<Option<SafeRecipe>, AppError> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM safe_recipes \
             WHERE original_recipe_id = $1 AND owner_id = $2"
        );
        let row = sqlx::query_as::<_, SafeRecipeRow>(&query)
            .bind(original_recipe_id)
            .bind(owner_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(SafeRecipe::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<SafeRecipe>, AppError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM safe_recipes WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, SafeRecipeRow>(&query)
            .bind(ids)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(SafeRecipe::try_from).collect()
    }
}
