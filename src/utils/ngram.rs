//! N-gram overlap scoring between a source text and a candidate rewrite.
//!
//! These functions are pure and stateless; thresholds and weight tables are
//! owned by the caller so tests can inject alternate policies.

use std::collections::HashSet;

/// Normalizes text for n-gram extraction.
///
/// Lower-cases the input, removes every character that is neither a word
/// character nor whitespace, and splits on whitespace. Punctuation is removed
/// rather than replaced, so `"200C."` normalizes to the single word `"200c"`.
fn normalize_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Extracts the set of contiguous `n`-word windows from normalized text.
///
/// Returns an empty set when the text has fewer than `n` words, so trivially
/// short inputs can never produce a false overlap signal.
pub fn ngrams(text: &str, n: usize) -> HashSet<String> {
    let words = normalize_words(text);
    if n == 0 || words.len() < n {
        return HashSet::new();
    }

    words.windows(n).map(|w| w.join(" ")).collect()
}

/// Fraction of the candidate's `n`-grams that also occur in the source.
///
/// Computed as `|source ∩ candidate| / |candidate|`. Defined as `0.0` when
/// either n-gram set is empty.
pub fn overlap_ratio(source: &str, candidate: &str, n: usize) -> f64 {
    let source_grams = ngrams(source, n);
    let candidate_grams = ngrams(candidate, n);

    if source_grams.is_empty() || candidate_grams.is_empty() {
        return 0.0;
    }

    let shared = candidate_grams.intersection(&source_grams).count();
    shared as f64 / candidate_grams.len() as f64
}

/// Weighted combination of overlap ratios across several n-gram sizes.
///
/// Each `(n, weight)` pair contributes `weight * overlap_ratio(source,
/// candidate, n)` to the sum. Weight tables are expected to increase with `n`
/// so that longer verbatim runs are penalized more heavily.
pub fn weighted_overlap(source: &str, candidate: &str, weights: &[(usize, f64)]) -> f64 {
    weights
        .iter()
        .map(|&(n, weight)| weight * overlap_ratio(source, candidate, n))
        .sum()
}

/// Fraction of the candidate's distinct words that also occur in the source.
///
/// A cheap lexical proxy used for borderline semantic screening; `0.0` when
/// the candidate has no words.
pub fn word_set_overlap(source: &str, candidate: &str) -> f64 {
    let source_words: HashSet<String> = normalize_words(source).into_iter().collect();
    let candidate_words: HashSet<String> = normalize_words(candidate).into_iter().collect();

    if candidate_words.is_empty() {
        return 0.0;
    }

    let shared = candidate_words.intersection(&source_words).count();
    shared as f64 / candidate_words.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        let words = normalize_words("Preheat oven to 200C.");
        assert_eq!(words, vec!["preheat", "oven", "to", "200c"]);
    }

    #[test]
    fn test_ngrams_basic() {
        let grams = ngrams("mix the flour and water", 3);
        assert_eq!(grams.len(), 3);
        assert!(grams.contains("mix the flour"));
        assert!(grams.contains("the flour and"));
        assert!(grams.contains("flour and water"));
    }

    #[test]
    fn test_ngrams_short_text_is_empty() {
        assert!(ngrams("two words", 3).is_empty());
        assert!(ngrams("", 1).is_empty());
        assert!(ngrams("one two three four five six seven", 8).is_empty());
    }

    #[test]
    fn test_ngrams_zero_n_is_empty() {
        assert!(ngrams("some text here", 0).is_empty());
    }

    #[test]
    fn test_overlap_ratio_identical_text() {
        let text = "stir the sauce until it thickens nicely";
        let ratio = overlap_ratio(text, text, 3);
        assert!((ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overlap_ratio_disjoint_text() {
        let ratio = overlap_ratio(
            "chop the onions finely before frying",
            "whisk eggs with cream and season well",
            3,
        );
        assert_eq!(ratio, 0.0);
    }

    #[test]
    fn test_overlap_ratio_empty_sets_are_zero() {
        // Candidate shorter than n: no false positives on trivial text.
        assert_eq!(overlap_ratio("plenty of words in this source text", "so short", 4), 0.0);
        // Source shorter than n.
        assert_eq!(overlap_ratio("so short", "plenty of words in this candidate text", 4), 0.0);
    }

    #[test]
    fn test_overlap_ratio_case_and_punctuation_insensitive() {
        let ratio = overlap_ratio(
            "Bring to a boil, then reduce the heat.",
            "bring to a boil then reduce the heat",
            4,
        );
        assert!((ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_eight_word_run_is_detected() {
        let source = "wash and dry the lettuce leaves thoroughly before chopping the tomatoes";
        // Candidate embeds a verbatim 8-word run from the source.
        let candidate = "first wash and dry the lettuce leaves thoroughly before serving cold";
        let ratio = overlap_ratio(source, candidate, 8);
        assert!(ratio > 0.0);
    }

    #[test]
    fn test_weighted_overlap_identical_sums_weights() {
        let weights = [(3, 0.05), (4, 0.10), (5, 0.15), (6, 0.20), (7, 0.25), (8, 0.25)];
        let text = "one two three four five six seven eight nine ten";
        let score = weighted_overlap(text, text, &weights);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_overlap_monotone_in_copied_amount() {
        let source = "alpha beta gamma delta epsilon zeta eta theta iota kappa \
                      lambda mu nu xi omicron pi rho sigma tau upsilon";

        // Same length, increasing verbatim prefix copied from the source.
        let light = "alpha beta gamma delta epsilon zeta eta theta cream sugar \
                     red blue green yellow purple orange pink brown black white";
        let heavy = "alpha beta gamma delta epsilon zeta eta theta iota kappa \
                     lambda mu nu xi red blue green yellow purple orange";

        let weights = [(3, 0.05), (4, 0.10), (5, 0.15), (6, 0.20), (7, 0.25), (8, 0.25)];
        let light_score = weighted_overlap(source, light, &weights);
        let heavy_score = weighted_overlap(source, heavy, &weights);
        assert!(heavy_score >= light_score);
        assert!(light_score > 0.0);
    }

    #[test]
    fn test_word_set_overlap_bounds() {
        let full = word_set_overlap("salt pepper oil", "oil pepper salt");
        assert!((full - 1.0).abs() < f64::EPSILON);

        let none = word_set_overlap("salt pepper oil", "vinegar mustard honey");
        assert_eq!(none, 0.0);

        assert_eq!(word_set_overlap("anything", ""), 0.0);
    }
}
