//! Core business entities of the sharing pipeline.

pub mod domain_quota;
pub mod ingredient;
pub mod recipe;
pub mod rewrite;
pub mod safe_recipe;
pub mod share_token;
pub mod step_graph;

pub use domain_quota::DomainQuota;
pub use ingredient::IngredientFact;
pub use recipe::Recipe;
pub use rewrite::RewriteResult;
pub use safe_recipe::{ComplianceMetrics, ImportedRecipe, SafeRecipe};
pub use share_token::{PRIVATE_IMPORT_SCOPE, ShareToken};
pub use step_graph::{Step, StepAction, StepGraph, TempUnit, Temperature};
