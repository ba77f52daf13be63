//! # Recipe Share
//!
//! A copyright-safe recipe transformation and sharing pipeline: rewrites a
//! stored recipe's instructions into demonstrably original wording, verifies
//! the rewrite against a quantitative overlap policy, and exchanges the
//! result with another user through a single-use, time-boxed link.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core business entities and repository traits
//! - **Application Layer** ([`application`]) - Pipeline logic and orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Database stores and the rewrite boundary
//!
//! ## Features
//!
//! - Heuristic step-graph parsing of instruction text
//! - N-gram overlap scoring with a hard verbatim-run gate
//! - Retry-once compliance gating with a stricter second pass
//! - Per-source-domain daily and 90-day rate limiting
//! - Race-free single-use share tokens with a 15-minute window
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use recipe_share::prelude::*;
//! use recipe_share::application::services::{
//!     ComplianceEvaluator, DomainQuotaLedger, QuotaPolicy, SharePolicy, StepGraphBuilder,
//! };
//! use recipe_share::infrastructure::persistence::*;
//! use recipe_share::infrastructure::rewrite::{Rewriter, UnconfiguredBackend};
//! use recipe_share::utils::clock::SystemClock;
//!
//! let clock = Arc::new(SystemClock);
//! let quota = DomainQuotaLedger::new(
//!     Arc::new(InMemoryQuotaRepository::new()),
//!     clock.clone(),
//!     QuotaPolicy::default(),
//! );
//! let service = ShareService::new(
//!     Arc::new(InMemoryRecipeRepository::new()),
//!     Arc::new(InMemorySafeRecipeRepository::new()),
//!     Arc::new(InMemoryShareTokenRepository::new()),
//!     quota,
//!     Arc::new(Rewriter::new(Arc::new(UnconfiguredBackend::new()))),
//!     StepGraphBuilder::new(),
//!     ComplianceEvaluator::default(),
//!     clock,
//!     SharePolicy::default(),
//! );
//! ```
//!
//! ## Out of Scope
//!
//! Recipe CRUD, authentication, web scraping, image generation, and the
//! HTTP/CLI surface are external collaborators. The crate exposes logical
//! operations only; callers map errors onto their wire format via
//! [`AppError::code`].
//!
//! ## Configuration
//!
//! Environment-driven settings load via [`config::Config`]; per-component
//! policies ([`application::services::CompliancePolicy`] and friends) are
//! plain structs injected at construction, never ambient globals.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub mod config;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        ComplianceEvaluator, DomainQuotaLedger, ShareOutcome, SharePreview, ShareService,
        StepGraphBuilder,
    };
    pub use crate::domain::entities::{
        ComplianceMetrics, ImportedRecipe, IngredientFact, Recipe, SafeRecipe, ShareToken,
    };
    pub use crate::error::AppError;
}
