//! Ingredient facts attached to recipes and shared artifacts.

use serde::{Deserialize, Serialize};

/// A single ingredient fact: name, amount, and pantry category.
///
/// Ingredient facts are data, not expression — they are copied verbatim
/// through the rewrite pipeline and are exempt from overlap checking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientFact {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "other".to_string()
}

impl IngredientFact {
    /// Creates a new ingredient fact.
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        unit: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            unit: unit.into(),
            category: category.into(),
        }
    }
}
