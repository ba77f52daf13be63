//! Pass/fail evaluation of a rewrite against the overlap policy.

use crate::domain::entities::ComplianceMetrics;
use crate::utils::ngram::{overlap_ratio, weighted_overlap, word_set_overlap};

/// Thresholds and weights for compliance checking.
///
/// All knobs are plain data so tests can tighten or loosen the policy; the
/// defaults are the production policy. This is a heuristic overlap policy,
/// not a determination of non-infringement.
#[derive(Debug, Clone)]
pub struct CompliancePolicy {
    /// `(n, weight)` pairs for the weighted overall overlap. Weights rise
    /// with `n` so longer verbatim matches cost more.
    pub ngram_weights: Vec<(usize, f64)>,
    /// Window length of the hard verbatim-run gate.
    pub verbatim_run_length: usize,
    /// Near-zero tolerance for the verbatim-run gate.
    pub verbatim_max_overlap: f64,
    /// Ceiling for the weighted overall overlap.
    pub weighted_max_overlap: f64,
    /// Overall overlap above which a borderline rewrite also gets the
    /// word-set semantic screen.
    pub semantic_band_floor: f64,
    /// Ceiling for the word-set semantic score on forced checks.
    pub semantic_max: f64,
    /// Multiplier applied to the raw word-set overlap before clamping.
    pub semantic_boost: f64,
}

impl Default for CompliancePolicy {
    fn default() -> Self {
        Self {
            ngram_weights: vec![
                (3, 0.05),
                (4, 0.10),
                (5, 0.15),
                (6, 0.20),
                (7, 0.25),
                (8, 0.25),
            ],
            verbatim_run_length: 8,
            verbatim_max_overlap: 0.01,
            weighted_max_overlap: 0.15,
            semantic_band_floor: 0.10,
            semantic_max: 0.80,
            semantic_boost: 1.2,
        }
    }
}

/// Scores a rewrite against its original and renders a verdict.
///
/// Evaluation never fails: a poor score is an expected outcome that drives
/// the caller's retry policy, not an error.
#[derive(Debug, Clone, Default)]
pub struct ComplianceEvaluator {
    policy: CompliancePolicy,
}

impl ComplianceEvaluator {
    /// Creates an evaluator with the given policy.
    pub fn new(policy: CompliancePolicy) -> Self {
        Self { policy }
    }

    /// Evaluates rewritten instructions against the originals.
    ///
    /// The word-set semantic screen runs when `force_semantic` is set (the
    /// second, stricter attempt) or when the weighted overlap lands in the
    /// borderline band just under the ceiling. Its score only blocks a
    /// forced check; on first attempts it is recorded but not enforced.
    pub fn evaluate(
        &self,
        original_instructions: &[String],
        rewritten_instructions: &[String],
        force_semantic: bool,
    ) -> ComplianceMetrics {
        let original_text = original_instructions.join(" ");
        let rewritten_text = rewritten_instructions.join(" ");

        let verbatim_overlap = overlap_ratio(
            &original_text,
            &rewritten_text,
            self.policy.verbatim_run_length,
        );
        let gate_passed = verbatim_overlap < self.policy.verbatim_max_overlap;

        let overall_overlap =
            weighted_overlap(&original_text, &rewritten_text, &self.policy.ngram_weights);

        let structure_variance = rewritten_instructions.len() != original_instructions.len();

        let borderline = overall_overlap > self.policy.semantic_band_floor
            && overall_overlap < self.policy.weighted_max_overlap;
        let semantic_avg = if force_semantic || borderline {
            (word_set_overlap(&original_text, &rewritten_text) * self.policy.semantic_boost)
                .min(1.0)
        } else {
            0.0
        };

        let passed = gate_passed
            && overall_overlap <= self.policy.weighted_max_overlap
            && (semantic_avg < self.policy.semantic_max || !force_semantic);

        ComplianceMetrics {
            ngram_max_overlap: verbatim_overlap.max(overall_overlap),
            semantic_avg,
            structure_variance,
            passed,
        }
    }
}
