//! Typed output of the rewrite service.

use serde::{Deserialize, Serialize};

/// A rewritten recipe as returned by the rewrite model.
///
/// Consumed immediately by compliance evaluation; never persisted directly.
/// `method_rewritten` is expected to hold 6–12 instruction strings for a
/// typical recipe, but length is not enforced here — a too-short rewrite
/// simply tends to fail structure or overlap checks downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteResult {
    pub title_generic: String,
    pub method_rewritten: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
