//! Share orchestration: create, preview, and redeem.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::{
    ComplianceMetrics, ImportedRecipe, PRIVATE_IMPORT_SCOPE, RewriteResult, SafeRecipe,
    ShareToken,
};
use crate::domain::repositories::{
    QuotaRepository, RecipeRepository, SafeRecipeRepository, ShareTokenRepository,
};
use crate::error::AppError;
use crate::infrastructure::rewrite::{RewriteError, RewriteService};
use crate::utils::clock::Clock;
use crate::utils::source_domain::extract_source_domain;
use crate::utils::source_hash::source_hash;
use crate::utils::token_generator::generate_share_token;

use super::compliance_service::ComplianceEvaluator;
use super::quota_service::DomainQuotaLedger;
use super::step_graph_builder::StepGraphBuilder;

/// Notice shown to recipients before they commit to an import.
pub const LEGAL_NOTICE: &str = "Recipes in this share are rewritten versions verified for \
original wording. Ingredient lists and quantities are facts, not protected expression; \
no source text or third-party images are included.";

/// Knobs for share creation and token issuance.
#[derive(Debug, Clone)]
pub struct SharePolicy {
    /// Token lifetime; expiry is evaluated lazily at access time.
    pub token_ttl_minutes: i64,
    /// Upper bound on one rewrite-model call. Elapse counts as a rewrite
    /// failure for that recipe, never a pipeline crash.
    pub rewrite_timeout: StdDuration,
    /// Total rewrite attempts per recipe (first try plus one stricter retry).
    pub max_rewrite_attempts: usize,
}

impl Default for SharePolicy {
    fn default() -> Self {
        Self {
            token_ttl_minutes: 15,
            rewrite_timeout: StdDuration::from_secs(30),
            max_rewrite_attempts: 2,
        }
    }
}

/// Result of a successful `create_share` call.
#[derive(Debug, Clone)]
pub struct ShareOutcome {
    pub token: String,
    pub recipe_count: usize,
    pub expires_in_minutes: i64,
    /// Per-recipe skips from a partially successful batch.
    pub issues: Vec<String>,
}

/// Minimal metadata shown before redemption. Deliberately contains no
/// recipe content — nothing leaks before a committed import.
#[derive(Debug, Clone)]
pub struct SharePreview {
    pub recipe_count: usize,
    pub expires_at: DateTime<Utc>,
    pub legal_notice: &'static str,
}

/// Orchestrates the copyright-safe sharing pipeline.
///
/// Create flow: per recipe — fetch, reuse a prior passing artifact if one
/// exists, check the source-domain quota, parse the step graph, rewrite,
/// evaluate compliance (retrying once with strict checking), persist, and
/// bump the quota. Recipes are processed independently; per-recipe failures
/// become `issues`, and only an empty batch fails outright.
///
/// Redeem flow: validate the token lifecycle, win the atomic single-use
/// transition, then copy rewritten text and facts for the requester.
pub struct ShareService<R, S, T, Q>
where
    R: RecipeRepository,
    S: SafeRecipeRepository,
    T: ShareTokenRepository,
    Q: QuotaRepository,
{
    recipes: Arc<R>,
    safe_recipes: Arc<S>,
    tokens: Arc<T>,
    quota: DomainQuotaLedger<Q>,
    rewriter: Arc<dyn RewriteService>,
    builder: StepGraphBuilder,
    evaluator: ComplianceEvaluator,
    clock: Arc<dyn Clock>,
    policy: SharePolicy,
}

impl<R, S, T, Q> ShareService<R, S, T, Q>
where
    R: RecipeRepository,
    S: SafeRecipeRepository,
    T: ShareTokenRepository,
    Q: QuotaRepository,
{
    /// Creates the orchestrator.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        recipes: Arc<R>,
        safe_recipes: Arc<S>,
        tokens: Arc<T>,
        quota: DomainQuotaLedger<Q>,
        rewriter: Arc<dyn RewriteService>,
        builder: StepGraphBuilder,
        evaluator: ComplianceEvaluator,
        clock: Arc<dyn Clock>,
        policy: SharePolicy,
    ) -> Self {
        Self {
            recipes,
            safe_recipes,
            tokens,
            quota,
            rewriter,
            builder,
            evaluator,
            clock,
            policy,
        }
    }

    /// Prepares compliant artifacts for `recipe_ids` and issues a share token.
    ///
    /// Recipes are processed independently: one recipe failing to fetch,
    /// rewrite, or comply never aborts the rest of the batch.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when no recipe in the batch could be
    /// shared; the collected per-recipe issues ride in the error details.
    /// Returns [`AppError::Internal`] on store errors while issuing the token.
    pub async fn create_share(
        &self,
        owner_id: &str,
        recipe_ids: &[String],
    ) -> Result<ShareOutcome, AppError> {
        let mut accepted: Vec<String> = Vec::new();
        let mut issues: Vec<String> = Vec::new();

        for recipe_id in recipe_ids {
            match self.prepare_safe_recipe(owner_id, recipe_id).await {
                Ok(safe_id) => accepted.push(safe_id),
                Err(err) => {
                    warn!(recipe_id, error = %err, "recipe skipped from share batch");
                    issues.push(format!("{recipe_id}: {err}"));
                }
            }
        }

        if accepted.is_empty() {
            return Err(AppError::bad_request(
                "No recipes could be shared",
                json!({ "issues": issues }),
            ));
        }

        let now = self.clock.now();
        let token_value = generate_share_token();
        let token = ShareToken::new(
            token_value.clone(),
            accepted.clone(),
            owner_id.to_string(),
            now,
            now + Duration::minutes(self.policy.token_ttl_minutes),
        );
        self.tokens.insert(token).await?;

        info!(
            owner_id,
            recipe_count = accepted.len(),
            skipped = issues.len(),
            "share token issued"
        );

        Ok(ShareOutcome {
            token: token_value,
            recipe_count: accepted.len(),
            expires_in_minutes: self.policy.token_ttl_minutes,
            issues,
        })
    }

    /// Returns token metadata without any recipe content.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown tokens and
    /// [`AppError::Gone`] for used or expired ones.
    pub async fn preview(&self, token_value: &str) -> Result<SharePreview, AppError> {
        let token = self
            .tokens
            .find_by_token(token_value)
            .await?
            .ok_or_else(|| AppError::not_found("Share link not found", json!({})))?;

        if token.used {
            return Err(AppError::gone(
                "This share link has already been used",
                json!({}),
            ));
        }
        if token.is_expired(self.clock.now()) {
            return Err(AppError::gone("This share link has expired", json!({})));
        }

        Ok(SharePreview {
            recipe_count: token.safe_recipe_ids.len(),
            expires_at: token.expires_at,
            legal_notice: LEGAL_NOTICE,
        })
    }

    /// Redeems a token and returns copies of the shared recipes.
    ///
    /// The `used` transition is a single atomic conditional write in the
    /// store: of two concurrent redeemers exactly one receives the recipes,
    /// the other gets `Gone`. Artifacts that lost their passing verdict
    /// between issuance and redemption are silently excluded.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`], [`AppError::Gone`],
    /// [`AppError::InvalidScope`], or [`AppError::SelfImport`] per the token
    /// lifecycle; these are surfaced immediately and never retried.
    pub async fn redeem(
        &self,
        token_value: &str,
        requester_id: &str,
    ) -> Result<Vec<ImportedRecipe>, AppError> {
        let token = self
            .tokens
            .find_by_token(token_value)
            .await?
            .ok_or_else(|| AppError::not_found("Share link not found", json!({})))?;

        if token.used {
            return Err(AppError::gone(
                "This share link has already been used",
                json!({}),
            ));
        }
        let now = self.clock.now();
        if token.is_expired(now) {
            return Err(AppError::gone("This share link has expired", json!({})));
        }
        if token.scope != PRIVATE_IMPORT_SCOPE {
            return Err(AppError::invalid_scope(
                "This share link does not permit importing",
                json!({ "scope": token.scope }),
            ));
        }
        if requester_id == token.sender_id {
            return Err(AppError::self_import(
                "You cannot import your own shared recipes",
                json!({}),
            ));
        }

        let claimed = self.tokens.redeem(token_value, requester_id, now).await?;
        if !claimed {
            // Lost the race against a concurrent redeemer.
            return Err(AppError::gone(
                "This share link has already been used",
                json!({}),
            ));
        }

        let artifacts = self.safe_recipes.find_by_ids(&token.safe_recipe_ids).await?;
        let imported: Vec<ImportedRecipe> = artifacts
            .iter()
            .filter(|safe| safe.compliance_metrics.passed)
            .map(ImportedRecipe::from)
            .collect();

        info!(
            requester_id,
            imported = imported.len(),
            "share token redeemed"
        );

        Ok(imported)
    }

    /// Produces (or reuses) the compliant artifact for one recipe and
    /// returns its id.
    async fn prepare_safe_recipe(
        &self,
        owner_id: &str,
        recipe_id: &str,
    ) -> Result<String, AppError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .filter(|r| r.owner_id == owner_id)
            .ok_or_else(|| {
                AppError::not_found(
                    "recipe not found or not owned by requester",
                    json!({ "recipe_id": recipe_id }),
                )
            })?;

        if let Some(existing) = self
            .safe_recipes
            .find_by_origin(recipe_id, owner_id)
            .await?
        {
            if existing.compliance_metrics.passed {
                debug!(recipe_id, "reusing prior compliant version");
                return Ok(existing.id);
            }
        }

        let domain = recipe
            .source_url
            .as_deref()
            .and_then(extract_source_domain)
            .unwrap_or_default();
        if !domain.is_empty() && !self.quota.check_and_reserve(&domain).await? {
            return Err(AppError::quota_exceeded(
                "quota exceeded for source domain",
                json!({ "domain": domain }),
            ));
        }

        let graph = self.builder.build(&recipe.instructions, &recipe.ingredients);

        let mut attempts = 0;
        let mut compliant: Option<(RewriteResult, ComplianceMetrics)> = None;
        while attempts < self.policy.max_rewrite_attempts {
            attempts += 1;
            let force_semantic = attempts > 1;

            let rewrite_call =
                self.rewriter
                    .rewrite(&graph, &recipe.ingredients, &recipe.name);
            let rewrite = match tokio::time::timeout(self.policy.rewrite_timeout, rewrite_call)
                .await
            {
                Err(_elapsed) => {
                    return Err(AppError::unavailable(
                        "rewrite service timed out",
                        json!({ "recipe_id": recipe_id }),
                    ));
                }
                Ok(Err(RewriteError::Unavailable(reason))) => {
                    return Err(AppError::unavailable(
                        "rewrite service unavailable",
                        json!({ "reason": reason }),
                    ));
                }
                Ok(Err(RewriteError::UpstreamMalformed(parse_err))) => {
                    warn!(recipe_id, attempt = attempts, error = %parse_err, "rewrite response unusable");
                    continue;
                }
                Ok(Ok(rewrite)) => rewrite,
            };

            let metrics =
                self.evaluator
                    .evaluate(&recipe.instructions, &rewrite.method_rewritten, force_semantic);
            if metrics.passed {
                compliant = Some((rewrite, metrics));
                break;
            }
            debug!(
                recipe_id,
                attempt = attempts,
                overlap = metrics.ngram_max_overlap,
                "rewrite failed compliance"
            );
        }

        let Some((rewrite, metrics)) = compliant else {
            return Err(AppError::compliance_failed(
                "could not generate a compliant version",
                json!({ "recipe_id": recipe_id, "attempts": attempts }),
            ));
        };

        let now = self.clock.now();
        let safe = SafeRecipe {
            id: Uuid::new_v4().to_string(),
            original_recipe_id: recipe.id.clone(),
            owner_id: owner_id.to_string(),
            title_generic: rewrite.title_generic,
            ingredients: recipe.ingredients.clone(),
            servings: recipe.servings,
            total_time_minutes: graph.total_time_minutes,
            method_rewritten: rewrite.method_rewritten,
            categories: recipe.categories.clone(),
            adapted_from_domain: (!domain.is_empty()).then(|| domain.clone()),
            compliance_metrics: metrics,
            source_hash: source_hash(&recipe.instructions),
            created_at: now,
            user_images: Vec::new(),
        };

        let stored = self.safe_recipes.upsert(safe).await?;
        if !domain.is_empty() {
            self.quota.increment(&domain).await?;
        }

        info!(recipe_id, safe_recipe_id = %stored.id, "compliant version persisted");
        Ok(stored.id)
    }
}
