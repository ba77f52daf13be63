//! Stored recipe as provided by the external recipe store.

use super::ingredient::IngredientFact;
use serde::{Deserialize, Serialize};

/// A user's stored recipe, as returned by the recipe store collaborator.
///
/// The pipeline only consumes this shape; recipe CRUD lives elsewhere.
/// `instructions` is the original prose the rewrite pipeline must never copy
/// into a shared artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub servings: i32,
    #[serde(default)]
    pub ingredients: Vec<IngredientFact>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}
