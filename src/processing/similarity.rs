//! String similarity between keywords

use strsim::levenshtein;

/// Similarity in [0, 1] between two keywords.
///
/// Case-insensitive equality scores 1.0, containment either way 0.8, and
/// anything else falls back to normalized Levenshtein distance.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.contains(b.as_str()) || b.contains(a.as_str()) {
        return 0.8;
    }

    let max_len = a.chars().count().max(b.chars().count());
    let distance = levenshtein(&a, &b);
    (1.0 - distance as f64 / max_len as f64).max(0.0)
}

/// Best similarity of `needle` against any candidate, with the winning candidate.
///
/// Ties keep the earliest candidate.
pub fn best_match<'a, I>(needle: &str, candidates: I) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let score = similarity(needle, candidate);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((candidate, score));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_and_case() {
        assert_eq!(similarity("Kubernetes", "kubernetes"), 1.0);
    }

    #[test]
    fn test_containment() {
        assert_eq!(similarity("react", "React Native"), 0.8);
        assert_eq!(similarity("spring boot", "boot"), 0.8);
    }

    #[test]
    fn test_levenshtein_fallback() {
        // one substitution across six characters
        let s = similarity("python", "pithon");
        assert!((s - (1.0 - 1.0 / 6.0)).abs() < 1e-9);
        assert!(similarity("docker", "terraform") < 0.5);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("rust", ""), 0.0);
    }

    #[test]
    fn test_best_match_prefers_first_on_tie() {
        let best = best_match("aws", ["AWS", "aws"]).unwrap();
        assert_eq!(best, ("AWS", 1.0));
        assert!(best_match("aws", std::iter::empty()).is_none());
    }
}
