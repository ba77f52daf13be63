//! Rewrite service contracts and error types.

use crate::domain::entities::{IngredientFact, RewriteResult, StepGraph};
use async_trait::async_trait;

use super::parser::RewriteParseError;

/// Errors from the rewrite boundary.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// The rewrite model is not configured or cannot be reached.
    #[error("rewrite service unavailable: {0}")]
    Unavailable(String),

    /// The model answered, but its output could not be parsed into a
    /// [`RewriteResult`] even after lenient recovery.
    #[error("rewrite response malformed: {0}")]
    UpstreamMalformed(#[from] RewriteParseError),
}

/// Produces rewritten instructions from a structured step graph.
///
/// Implementations receive only neutral step facts and ingredient data —
/// never the original prose — so the output cannot echo source text the
/// model was never shown. Calls may block on the network; callers apply
/// their own timeout and treat elapse as a failed attempt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RewriteService: Send + Sync {
    /// Rewrites a recipe's method from its parsed step graph.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::Unavailable`] when no model is reachable and
    /// [`RewriteError::UpstreamMalformed`] when the response defies parsing.
    async fn rewrite(
        &self,
        graph: &StepGraph,
        ingredients: &[IngredientFact],
        original_title: &str,
    ) -> Result<RewriteResult, RewriteError>;
}

/// Raw text-completion transport beneath [`Rewriter`](super::Rewriter).
///
/// Abstracts the model call itself (HTTP client, SDK, test script) from
/// prompt construction and response parsing, which the pipeline owns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RewriteBackend: Send + Sync {
    /// Sends one completion request and returns the model's raw text.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::Unavailable`] on transport failure.
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
    -> Result<String, RewriteError>;
}
