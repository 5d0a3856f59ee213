//! "Did you mean" suggestions for missing message keys.

use strsim::levenshtein;

/// Maximum number of suggestions returned.
const MAX_SUGGESTIONS: usize = 3;

/// Suggest up to three keys close to `key`, closest first.
///
/// A candidate qualifies when its edit distance is at most a third of the
/// longer string's length (and at least one edit is always allowed).
///
/// ```
/// use transtag::compute_suggestions;
///
/// let keys = ["hello", "help", "goodbye"];
/// assert_eq!(compute_suggestions("helo", &keys), vec!["hello", "help"]);
/// assert!(compute_suggestions("xyz", &keys).is_empty());
/// ```
pub fn compute_suggestions(key: &str, candidates: &[&str]) -> Vec<String> {
    let key_len = key.chars().count();
    let mut scored: Vec<(usize, &str)> = candidates
        .iter()
        .filter(|candidate| **candidate != key)
        .filter_map(|candidate| {
            let distance = levenshtein(key, candidate);
            let longest = key_len.max(candidate.chars().count());
            let threshold = longest.div_euclid(3).max(1);
            (distance <= threshold).then_some((distance, *candidate))
        })
        .collect();
    scored.sort_unstable();
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
