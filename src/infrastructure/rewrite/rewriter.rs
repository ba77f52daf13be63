//! Prompt-building rewrite service over a pluggable completion backend.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::{IngredientFact, RewriteResult, StepGraph, TempUnit};

use super::parser::parse_rewrite_response;
use super::service::{RewriteBackend, RewriteError, RewriteService};

const SYSTEM_PROMPT: &str = "You write original cooking instructions from structured step facts. \
You are given step outlines (action, timing, temperature, ingredients involved), never the \
source text, and you must produce fresh wording in your own voice. \
Respond with ONLY a valid JSON object, no markdown and no explanation, with fields: \
title_generic (a short generic dish title), \
method_rewritten (an array of 6-12 instruction strings), \
notes (optional string with serving advice).";

/// [`RewriteService`] implementation that prompts a completion model.
///
/// Owns prompt construction and response parsing; the model transport is a
/// [`RewriteBackend`] so tests and embedders swap it freely.
pub struct Rewriter {
    backend: Arc<dyn RewriteBackend>,
}

impl Rewriter {
    /// Creates a rewriter over the given completion backend.
    pub fn new(backend: Arc<dyn RewriteBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl RewriteService for Rewriter {
    async fn rewrite(
        &self,
        graph: &StepGraph,
        ingredients: &[IngredientFact],
        original_title: &str,
    ) -> Result<RewriteResult, RewriteError> {
        let prompt = build_user_prompt(graph, ingredients, original_title);
        let raw = self.backend.complete(SYSTEM_PROMPT, &prompt).await?;

        tracing::debug!(chars = raw.len(), "rewrite backend answered");

        Ok(parse_rewrite_response(&raw)?)
    }
}

/// Renders the step graph and ingredient facts as a neutral outline.
///
/// Only extracted facts appear here — action kinds, minutes, degrees,
/// ingredient names — so the model has nothing verbatim to echo.
fn build_user_prompt(
    graph: &StepGraph,
    ingredients: &[IngredientFact],
    original_title: &str,
) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "Write a new method for a dish of the kind: {original_title}."
    );

    let _ = writeln!(prompt, "\nIngredients:");
    for fact in ingredients {
        let _ = writeln!(prompt, "- {} {} {}", fact.quantity, fact.unit, fact.name);
    }

    let _ = writeln!(prompt, "\nStep outline:");
    for step in &graph.steps {
        let _ = write!(prompt, "{}. {}", step.order, step.action);
        if let Some(minutes) = step.time_minutes {
            let _ = write!(prompt, ", about {minutes} min");
        }
        if let Some(temp) = step.temperature {
            let unit = match temp.unit {
                TempUnit::Celsius => "C",
                TempUnit::Fahrenheit => "F",
            };
            let _ = write!(prompt, ", at {} {unit}", temp.value);
        }
        if !step.ingredient_refs.is_empty() {
            let refs: Vec<&str> = step.ingredient_refs.iter().map(String::as_str).collect();
            let _ = write!(prompt, ", involving {}", refs.join(", "));
        }
        let _ = writeln!(prompt);
    }

    if graph.total_time_minutes > 0 {
        let _ = writeln!(
            prompt,
            "\nTotal active time is around {} minutes.",
            graph.total_time_minutes
        );
    }

    prompt
}
