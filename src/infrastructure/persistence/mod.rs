//! Repository implementations.
//!
//! Concrete implementations of the domain repository traits: PostgreSQL via
//! SQLx for production deployments, and in-memory stores sharing the same
//! atomicity contracts for tests and database-free embedding.
//!
//! # Expected PostgreSQL schema
//!
//! ```sql
//! CREATE TABLE safe_recipes (
//!     id TEXT PRIMARY KEY,
//!     original_recipe_id TEXT NOT NULL,
//!     owner_id TEXT NOT NULL,
//!     title_generic TEXT NOT NULL,
//!     ingredients TEXT NOT NULL,
//!     servings INT NOT NULL,
//!     total_time_minutes INT NOT NULL,
//!     method_rewritten TEXT NOT NULL,
//!     categories TEXT NOT NULL,
//!     adapted_from_domain TEXT,
//!     compliance_metrics TEXT NOT NULL,
//!     source_hash TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL,
//!     user_images TEXT NOT NULL,
//!     UNIQUE (original_recipe_id, owner_id)
//! );
//!
//! CREATE TABLE share_tokens (
//!     token TEXT PRIMARY KEY,
//!     safe_recipe_ids TEXT NOT NULL,
//!     sender_id TEXT NOT NULL,
//!     scope TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL,
//!     expires_at TIMESTAMPTZ NOT NULL,
//!     used BOOLEAN NOT NULL DEFAULT FALSE,
//!     used_at TIMESTAMPTZ,
//!     used_by TEXT
//! );
//!
//! CREATE TABLE domain_quotas (
//!     domain TEXT PRIMARY KEY,
//!     daily_count BIGINT NOT NULL,
//!     daily_reset_at TIMESTAMPTZ NOT NULL,
//!     rolling_count_90d BIGINT NOT NULL,
//!     last_import_at TIMESTAMPTZ
//! );
//! ```
//!
//! # Repositories
//!
//! - [`PgSafeRecipeRepository`] / [`InMemorySafeRecipeRepository`] - Shareable artifacts
//! - [`PgShareTokenRepository`] / [`InMemoryShareTokenRepository`] - Single-use tokens
//! - [`PgQuotaRepository`] / [`InMemoryQuotaRepository`] - Per-domain counters
//! - [`InMemoryRecipeRepository`] - Seedable recipe store for tests

pub mod memory;
pub mod pg_quota_repository;
pub mod pg_safe_recipe_repository;
pub mod pg_share_token_repository;

pub use memory::{
    InMemoryQuotaRepository, InMemoryRecipeRepository, InMemorySafeRecipeRepository,
    InMemoryShareTokenRepository,
};
pub use pg_quota_repository::PgQuotaRepository;
pub use pg_safe_recipe_repository::PgSafeRecipeRepository;
pub use pg_share_token_repository::PgShareTokenRepository;
