#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use recipe_share::application::services::{
    ComplianceEvaluator, DomainQuotaLedger, QuotaPolicy, SharePolicy, ShareService,
    StepGraphBuilder,
};
use recipe_share::domain::entities::{IngredientFact, Recipe};
use recipe_share::infrastructure::persistence::{
    InMemoryQuotaRepository, InMemoryRecipeRepository, InMemorySafeRecipeRepository,
    InMemoryShareTokenRepository,
};
use recipe_share::infrastructure::rewrite::{RewriteBackend, RewriteError, Rewriter};
use recipe_share::utils::clock::ManualClock;

/// Installs a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Rewrite backend that replays canned responses and counts calls.
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RewriteBackend for ScriptedBackend {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, RewriteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| RewriteError::Unavailable("script exhausted".to_string()))
    }
}

pub type TestShareService = ShareService<
    InMemoryRecipeRepository,
    InMemorySafeRecipeRepository,
    InMemoryShareTokenRepository,
    InMemoryQuotaRepository,
>;

/// Fully wired pipeline over in-memory stores and a scripted rewrite model.
pub struct World {
    pub recipes: Arc<InMemoryRecipeRepository>,
    pub safe_recipes: Arc<InMemorySafeRecipeRepository>,
    pub tokens: Arc<InMemoryShareTokenRepository>,
    pub quotas: Arc<InMemoryQuotaRepository>,
    pub clock: Arc<ManualClock>,
    pub backend: Arc<ScriptedBackend>,
    pub service: Arc<TestShareService>,
}

/// Builds a world whose rewrite model answers with `responses`, in order.
pub fn world_with_responses(responses: Vec<String>) -> World {
    init_tracing();

    let recipes = Arc::new(InMemoryRecipeRepository::new());
    let safe_recipes = Arc::new(InMemorySafeRecipeRepository::new());
    let tokens = Arc::new(InMemoryShareTokenRepository::new());
    let quotas = Arc::new(InMemoryQuotaRepository::new());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let backend = Arc::new(ScriptedBackend::new(responses));

    let quota_ledger =
        DomainQuotaLedger::new(quotas.clone(), clock.clone(), QuotaPolicy::default());
    let service = Arc::new(ShareService::new(
        recipes.clone(),
        safe_recipes.clone(),
        tokens.clone(),
        quota_ledger,
        Arc::new(Rewriter::new(backend.clone())),
        StepGraphBuilder::new(),
        ComplianceEvaluator::default(),
        clock.clone(),
        SharePolicy::default(),
    ));

    World {
        recipes,
        safe_recipes,
        tokens,
        quotas,
        clock,
        backend,
        service,
    }
}

/// The soup recipe used as a canonical fixture across the suite.
pub fn soup_recipe(id: &str, owner: &str) -> Recipe {
    Recipe {
        id: id.to_string(),
        owner_id: owner.to_string(),
        name: "Root Vegetable Soup".to_string(),
        description: "A simple soup".to_string(),
        servings: 2,
        ingredients: vec![
            IngredientFact::new("onion", "1", "", "produce"),
            IngredientFact::new("carrot", "2", "", "produce"),
            IngredientFact::new("stock", "500", "ml", "pantry"),
        ],
        instructions: vec![
            "Preheat oven to 200C.".to_string(),
            "Dice the onion and carrot.".to_string(),
            "Fry the onion for 5 minutes.".to_string(),
            "Add stock and simmer for 20 minutes.".to_string(),
            "Serve hot.".to_string(),
        ],
        source_url: None,
        categories: vec!["quick-easy".to_string()],
    }
}

/// A model answer that passes compliance against [`soup_recipe`].
pub fn compliant_response() -> String {
    serde_json::json!({
        "title_generic": "Vegetable Soup",
        "method_rewritten": [
            "Cut the onion and carrot into small pieces.",
            "Heat the oven to 200C.",
            "Cook the onion in a pan for five minutes.",
            "Pour in stock and let it simmer for twenty minutes.",
            "Plate and serve warm.",
        ],
        "notes": "Best eaten fresh.",
    })
    .to_string()
}

/// A model answer that echoes the original prose and can never pass.
pub fn plagiarized_response() -> String {
    serde_json::json!({
        "title_generic": "Soup",
        "method_rewritten": [
            "Preheat oven to 200C.",
            "Dice the onion and carrot.",
            "Fry the onion for 5 minutes.",
            "Add stock and simmer for 20 minutes.",
            "Serve hot.",
        ],
    })
    .to_string()
}
