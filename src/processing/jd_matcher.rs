//! Job description keyword extraction and resume matching

use crate::processing::similarity::best_match;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MATCH_THRESHOLD: f64 = 0.8;
const MAX_JD_KEYWORDS: usize = 30;
const MAX_MISSING_RETURNED: usize = 15;
const MIN_KEYWORD_CHARS: usize = 3;
const MAX_KEYWORD_CHARS: usize = 49;

static CAPITALIZED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-zA-Z0-9]*(?:[ \t]+[A-Z][a-zA-Z0-9]*)*\b")
        .expect("Invalid capitalized term regex")
});

static ACRONYM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{2,}\b").expect("Invalid acronym regex"));

static REQUIREMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:required|must have|looking for|seeking|experience (?:with|in)|proficiency (?:with|in))[:\s]+([^.;\n]+)",
    )
    .expect("Invalid requirement regex")
});

static LIST_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i),|\band\b|\bor\b").expect("Invalid list split regex"));

/// Capitalized words that open sentences rather than name skills.
const CAPITALIZED_STOP_WORDS: &[&str] = &[
    "a", "about", "an", "and", "are", "as", "at", "be", "by", "experience", "for", "from", "if",
    "in", "is", "it", "join", "looking", "must", "of", "on", "or", "our", "preferred",
    "proficiency", "required", "requirements", "responsibilities", "seeking", "the", "this",
    "to", "we", "what", "who", "will", "with", "you", "your",
];

const LEADING_ARTICLES: &[&str] = &["a ", "an ", "the "];

/// Outcome of matching a resume's keywords against a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    pub match_score: u32,
    /// Percentage of job description keywords found in the resume.
    pub keyword_overlap: u32,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub total_keywords: usize,
}

/// Pull candidate skill terms out of a job description.
///
/// Capitalized terms come first, then acronyms, then the phrases that follow
/// requirement cues. Duplicates are dropped case-insensitively.
pub fn extract_jd_keywords(job_description: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    for m in CAPITALIZED_RE.find_iter(job_description) {
        let term = m.as_str();
        let is_single_word = !term.contains(char::is_whitespace);
        if is_single_word && CAPITALIZED_STOP_WORDS.contains(&term.to_lowercase().as_str()) {
            continue;
        }
        candidates.push(term.to_string());
    }

    candidates.extend(ACRONYM_RE.find_iter(job_description).map(|m| m.as_str().to_string()));

    for caps in REQUIREMENT_RE.captures_iter(job_description) {
        if let Some(list) = caps.get(1) {
            for part in LIST_SPLIT_RE.split(list.as_str()) {
                let mut part = part.trim();
                for article in LEADING_ARTICLES {
                    if part.len() > article.len()
                        && part.is_char_boundary(article.len())
                        && part[..article.len()].eq_ignore_ascii_case(article)
                    {
                        part = part[article.len()..].trim();
                    }
                }
                candidates.push(part.to_string());
            }
        }
    }

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| {
            let len = k.chars().count();
            (MIN_KEYWORD_CHARS..=MAX_KEYWORD_CHARS).contains(&len)
        })
        .filter(|k| seen.insert(k.to_lowercase()))
        .take(MAX_JD_KEYWORDS)
        .collect()
}

/// Match resume keywords against the job description's keyword set.
pub fn match_against_jd<'a, I>(resume_keywords: I, job_description: &str) -> JobMatch
where
    I: IntoIterator<Item = &'a str>,
{
    let resume_keywords: Vec<&str> = resume_keywords.into_iter().collect();
    let jd_keywords = extract_jd_keywords(job_description);

    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for keyword in &jd_keywords {
        let best = best_match(keyword, resume_keywords.iter().copied()).map_or(0.0, |(_, s)| s);
        if best > MATCH_THRESHOLD {
            matched.push(keyword.clone());
        } else {
            missing.push(keyword.clone());
        }
    }

    let total = jd_keywords.len();
    let keyword_overlap = keyword_overlap(matched.len(), total);
    let match_score = match_score(keyword_overlap, matched.len(), missing.len());

    log::debug!(
        "Job description match: {}/{} keywords, overlap {}%, score {}",
        matched.len(),
        total,
        keyword_overlap,
        match_score
    );

    missing.truncate(MAX_MISSING_RETURNED);

    JobMatch {
        match_score,
        keyword_overlap,
        matched_keywords: matched,
        missing_keywords: missing,
        total_keywords: total,
    }
}

pub fn keyword_overlap(matched: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (matched as f64 / total as f64 * 100.0).round() as u32
}

/// `missing` is the full missing count, before the returned list is capped.
pub fn match_score(overlap: u32, matched: usize, missing: usize) -> u32 {
    let absolute = if matched >= 10 { 25.0 } else { matched as f64 * 2.5 };
    let few_missing = if missing < 5 {
        15.0
    } else {
        (15.0 - missing as f64).max(0.0)
    };
    let score = overlap as f64 * 0.6 + absolute + few_missing;
    score.round().clamp(0.0, 100.0) as u32
}
