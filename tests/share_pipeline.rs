mod common;

use common::{compliant_response, plagiarized_response, soup_recipe, world_with_responses};
use recipe_share::AppError;
use recipe_share::domain::repositories::{QuotaRepository, SafeRecipeRepository};
use recipe_share::utils::clock::Clock;

#[tokio::test]
async fn test_create_share_end_to_end() {
    let world = world_with_responses(vec![compliant_response()]);
    world.recipes.insert(soup_recipe("r1", "sender"));

    let outcome = world
        .service
        .create_share("sender", &["r1".to_string()])
        .await
        .unwrap();

    assert_eq!(outcome.recipe_count, 1);
    assert_eq!(outcome.expires_in_minutes, 15);
    assert!(outcome.issues.is_empty());
    assert_eq!(outcome.token.len(), 43);

    // The persisted artifact carries facts, the rewrite, and audit data —
    // and starts with no images.
    let safe = world
        .safe_recipes
        .find_by_origin("r1", "sender")
        .await
        .unwrap()
        .expect("artifact persisted");
    assert!(safe.compliance_metrics.passed);
    assert!(!safe.compliance_metrics.structure_variance);
    assert_eq!(safe.title_generic, "Vegetable Soup");
    assert_eq!(safe.ingredients.len(), 3);
    assert_eq!(safe.total_time_minutes, 25);
    assert_eq!(safe.source_hash.len(), 64);
    assert!(safe.user_images.is_empty());
    assert!(safe.adapted_from_domain.is_none());
}

#[tokio::test]
async fn test_create_share_reuses_prior_passing_artifact() {
    let world = world_with_responses(vec![compliant_response(), compliant_response()]);
    world.recipes.insert(soup_recipe("r1", "sender"));

    let first = world
        .service
        .create_share("sender", &["r1".to_string()])
        .await
        .unwrap();
    let second = world
        .service
        .create_share("sender", &["r1".to_string()])
        .await
        .unwrap();

    // The second share reused the stored artifact instead of rewriting again.
    assert_eq!(world.backend.call_count(), 1);
    assert_eq!(second.recipe_count, 1);
    assert_ne!(first.token, second.token);
}

#[tokio::test]
async fn test_noncompliant_first_attempt_retries_once() {
    let world = world_with_responses(vec![plagiarized_response(), compliant_response()]);
    world.recipes.insert(soup_recipe("r1", "sender"));

    let outcome = world
        .service
        .create_share("sender", &["r1".to_string()])
        .await
        .unwrap();

    assert_eq!(world.backend.call_count(), 2);
    assert_eq!(outcome.recipe_count, 1);
    assert!(outcome.issues.is_empty());
}

#[tokio::test]
async fn test_persistently_noncompliant_recipe_fails_batch() {
    // Both attempts echo the original; the bounded retry stops at two.
    let world = world_with_responses(vec![
        plagiarized_response(),
        plagiarized_response(),
        plagiarized_response(),
    ]);
    world.recipes.insert(soup_recipe("r1", "sender"));

    let err = world
        .service
        .create_share("sender", &["r1".to_string()])
        .await
        .unwrap_err();

    assert_eq!(world.backend.call_count(), 2);
    assert!(matches!(err, AppError::Validation { .. }));
    assert!(err.to_string().contains("No recipes could be shared"));

    // A failing artifact is never persisted.
    let stored = world
        .safe_recipes
        .find_by_origin("r1", "sender")
        .await
        .unwrap();
    assert!(stored.is_none());
}

#[tokio::test]
async fn test_partial_batch_reports_issue_and_succeeds() {
    let world = world_with_responses(vec![compliant_response()]);
    world.recipes.insert(soup_recipe("r-good", "sender"));

    let outcome = world
        .service
        .create_share("sender", &["r-missing".to_string(), "r-good".to_string()])
        .await
        .unwrap();

    assert_eq!(outcome.recipe_count, 1);
    assert_eq!(outcome.issues.len(), 1);
    assert!(outcome.issues[0].starts_with("r-missing:"));
}

#[tokio::test]
async fn test_recipe_of_another_owner_is_skipped() {
    let world = world_with_responses(vec![]);
    world.recipes.insert(soup_recipe("r1", "someone-else"));

    let err = world
        .service
        .create_share("sender", &["r1".to_string()])
        .await
        .unwrap_err();

    // Ownership failures read the same as missing recipes.
    assert!(err.to_string().contains("No recipes could be shared"));
    assert_eq!(world.backend.call_count(), 0);
}

#[tokio::test]
async fn test_unavailable_rewrite_model_empties_the_batch() {
    // An exhausted script behaves like a backend with no credentials.
    let world = world_with_responses(vec![]);
    world.recipes.insert(soup_recipe("r1", "sender"));

    let err = world
        .service
        .create_share("sender", &["r1".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation { .. }));
}

#[tokio::test]
async fn test_sourced_recipe_attributes_domain_and_counts_quota() {
    let world = world_with_responses(vec![compliant_response()]);
    let mut recipe = soup_recipe("r1", "sender");
    recipe.source_url = Some("https://www.greenchef.com/recipes/soup".to_string());
    world.recipes.insert(recipe);

    world
        .service
        .create_share("sender", &["r1".to_string()])
        .await
        .unwrap();

    let safe = world
        .safe_recipes
        .find_by_origin("r1", "sender")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(safe.adapted_from_domain.as_deref(), Some("greenchef.com"));

    let quota = world
        .quotas
        .find_by_domain("greenchef.com")
        .await
        .unwrap()
        .expect("quota record created");
    assert_eq!(quota.daily_count, 1);
    assert_eq!(quota.rolling_count_90d, 1);
}

#[tokio::test]
async fn test_exhausted_domain_quota_skips_recipe() {
    let world = world_with_responses(vec![]);
    let mut recipe = soup_recipe("r1", "sender");
    recipe.source_url = Some("https://busykitchen.com/pasta".to_string());
    world.recipes.insert(recipe);

    // Ten prior imports today exhaust the daily cap.
    let now = world.clock.now();
    for _ in 0..10 {
        world.quotas.increment("busykitchen.com", now).await.unwrap();
    }

    let err = world
        .service
        .create_share("sender", &["r1".to_string()])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("No recipes could be shared"));
    // Denied before any rewrite was attempted.
    assert_eq!(world.backend.call_count(), 0);
}
