//! Whole-word, case-insensitive multi-term matching

use crate::error::{AtsScorerError, Result};
use aho_corasick::{AhoCorasick, MatchKind};

/// Compiled matcher over a fixed term list.
///
/// Every term carries one or more tags. A term supplied twice keeps both
/// tags, so callers that count per tag see the term twice.
#[derive(Debug, Clone)]
pub struct TermMatcher<T> {
    automaton: AhoCorasick,
    terms: Vec<String>,
    tags: Vec<Vec<T>>,
}

/// Occurrences of one term in a scanned text.
#[derive(Debug, Clone, PartialEq)]
pub struct TermHit<'a, T> {
    pub term: &'a str,
    pub count: usize,
    /// Byte offsets of each whole-word occurrence, ascending.
    pub positions: Vec<usize>,
    pub tags: &'a [T],
}

impl<T: Clone> TermMatcher<T> {
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
    {
        let mut terms: Vec<String> = Vec::new();
        let mut tags: Vec<Vec<T>> = Vec::new();

        for (term, tag) in entries {
            let term = term.as_ref().trim().to_lowercase();
            if term.is_empty() {
                continue;
            }
            match terms.iter().position(|t| *t == term) {
                Some(idx) => tags[idx].push(tag),
                None => {
                    terms.push(term);
                    tags.push(vec![tag]);
                }
            }
        }

        // Standard semantics so overlapping terms ("spring", "spring boot")
        // are all reported.
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&terms)
            .map_err(|e| AtsScorerError::Lexicon(format!("Failed to build term matcher: {}", e)))?;

        Ok(Self {
            automaton,
            terms,
            tags,
        })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Find whole-word occurrences of every term.
    ///
    /// Hits come back in term insertion order; terms that never occur are
    /// omitted.
    pub fn scan(&self, text: &str) -> Vec<TermHit<'_, T>> {
        let mut positions: Vec<Vec<usize>> = vec![Vec::new(); self.terms.len()];
        let mut last_end: Vec<usize> = vec![0; self.terms.len()];

        for mat in self.automaton.find_overlapping_iter(text) {
            let id = mat.pattern().as_usize();
            if !positions[id].is_empty() && mat.start() < last_end[id] {
                continue;
            }
            if is_whole_word(text, mat.start(), mat.end()) {
                positions[id].push(mat.start());
                last_end[id] = mat.end();
            }
        }

        positions
            .into_iter()
            .enumerate()
            .filter(|(_, p)| !p.is_empty())
            .map(|(id, positions)| TermHit {
                term: &self.terms[id],
                count: positions.len(),
                positions,
                tags: &self.tags[id],
            })
            .collect()
    }

    /// Total whole-word occurrences across all terms.
    pub fn count_all(&self, text: &str) -> usize {
        self.scan(text).iter().map(|hit| hit.count).sum()
    }

    /// Number of distinct terms present at least once.
    pub fn count_distinct(&self, text: &str) -> usize {
        self.scan(text).len()
    }

    pub fn contains_any(&self, text: &str) -> bool {
        !self.scan(text).is_empty()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !is_word_char(c));
    let after_ok = text[end..].chars().next().map_or(true, |c| !is_word_char(c));
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(terms: &[&str]) -> TermMatcher<()> {
        TermMatcher::new(terms.iter().map(|t| (*t, ()))).unwrap()
    }

    #[test]
    fn test_whole_word_only() {
        let m = matcher(&["java", "go"]);
        let hits = m.scan("JavaScript and Golang, but also Java and go.");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].term, "java");
        assert_eq!(hits[0].count, 1);
        assert_eq!(hits[1].term, "go");
        assert_eq!(hits[1].count, 1);
    }

    #[test]
    fn test_case_insensitive_positions() {
        let m = matcher(&["aws"]);
        let hits = m.scan("AWS, aws and Aws");
        assert_eq!(hits[0].count, 3);
        assert_eq!(hits[0].positions, vec![0, 5, 13]);
    }

    #[test]
    fn test_overlapping_terms_both_reported() {
        let m = matcher(&["spring", "spring boot"]);
        let hits = m.scan("Built services in Spring Boot");
        let terms: Vec<&str> = hits.iter().map(|h| h.term).collect();
        assert_eq!(terms, vec!["spring", "spring boot"]);
    }

    #[test]
    fn test_symbol_terms() {
        let m = matcher(&["c++", "c#", "node.js"]);
        let hits = m.scan("Wrote C++ and C# tools; shipped Node.js APIs.");
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_duplicate_terms_keep_every_tag() {
        let m = TermMatcher::new(vec![("docker", 1), ("kubernetes", 1), ("docker", 2)]).unwrap();
        assert_eq!(m.len(), 2);
        let hits = m.scan("docker docker");
        assert_eq!(hits[0].tags, &[1, 2]);
        assert_eq!(hits[0].count, 2);
    }

    #[test]
    fn test_counts() {
        let m = matcher(&["led", "built"]);
        let text = "Led a team. Built tools. Led migration. Ledger work.";
        assert_eq!(m.count_all(text), 3);
        assert_eq!(m.count_distinct(text), 2);
        assert!(m.contains_any(text));
        assert!(!m.contains_any("nothing relevant"));
    }
}
