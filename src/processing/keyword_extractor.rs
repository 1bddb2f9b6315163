//! Weighted keyword inventory for a resume

use crate::error::Result;
use crate::processing::document::{extract_title, SectionType};
use crate::processing::jd_matcher::extract_jd_keywords;
use crate::processing::lexicon::{lexicon, ImpactTier, Industry, KeywordCategory};
use crate::processing::profile::UserProfile;
use crate::processing::similarity::best_match;
use crate::processing::term_matcher::{TermHit, TermMatcher};
use crate::processing::text_processor::{context_snippets, split_sentences, word_count};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

const BUZZWORD_BASE_SCORE: f64 = 0.2;
const PROFILE_SKILL_BOOST: f64 = 1.3;
const SENIOR_LEADERSHIP_BOOST: f64 = 1.4;
const SEMANTIC_THRESHOLD: f64 = 0.7;
const MAX_KEYWORDS: usize = 50;
const MAX_SEMANTIC_MATCHES: usize = 15;
const MAX_SUGGESTIONS: usize = 20;
const MAX_CATEGORY_SUGGESTIONS: usize = 10;
const SUGGESTION_CATEGORIES: usize = 3;
const MAX_MISSING_CRITICAL: usize = 5;
const MIN_REQUIRED_WORD_CHARS: usize = 5;
/// A title line longer than this is prose, not a name.
const MAX_NAME_WORDS: usize = 4;

static DOTTED_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\.[a-z]+)+\b").expect("Invalid dotted name regex")
});

static ACRONYM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{2,}\b").expect("Invalid acronym regex"));

static YEARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b\d+\+?\s*years?\b").expect("Invalid years regex"));

static REQUIRED_CUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\brequired\b|\bmust have\b|\bmandatory\b").expect("Invalid required cue regex")
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub term: String,
    pub category: KeywordCategory,
    pub weight: f64,
    pub score: f64,
    pub frequency: usize,
    pub contexts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
}

/// A resume keyword that resembles, without equalling, a job description keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticMatch {
    pub resume_term: String,
    pub job_term: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordInventory {
    /// Top keywords by score, highest first.
    pub keywords: Vec<KeywordRecord>,
    pub semantic_matches: Vec<SemanticMatch>,
    pub keyword_density: f64,
    pub unique_keyword_count: usize,
    pub total_occurrences: usize,
    pub suggestions: Vec<String>,
    pub missing_critical: Vec<String>,
}

/// Per-industry dictionary matchers, compiled once.
pub struct DictionaryMatchers {
    matchers: BTreeMap<Industry, TermMatcher<KeywordCategory>>,
}

impl DictionaryMatchers {
    pub fn new() -> Result<Self> {
        let mut matchers = BTreeMap::new();
        for profile in &lexicon().industries {
            let matcher = TermMatcher::new(profile.terms().map(|(category, term)| (term, category)))?;
            matchers.insert(profile.industry, matcher);
        }
        Ok(Self { matchers })
    }

    pub fn get(&self, industry: Industry) -> Option<&TermMatcher<KeywordCategory>> {
        self.matchers.get(&industry)
    }

    pub fn scan<'a>(&'a self, industry: Industry, text: &str) -> Vec<TermHit<'a, KeywordCategory>> {
        self.get(industry).map(|m| m.scan(text)).unwrap_or_default()
    }
}

pub struct KeywordExtractor {
    dictionaries: DictionaryMatchers,
    action_verbs: TermMatcher<ImpactTier>,
    soft_skills: TermMatcher<()>,
    buzzwords: TermMatcher<()>,
}

impl KeywordExtractor {
    pub fn new() -> Result<Self> {
        let lex = lexicon();
        let action_verbs = TermMatcher::new(
            lex.action_verbs
                .iter()
                .flat_map(|(tier, verbs)| verbs.iter().map(move |verb| (*verb, *tier))),
        )?;
        let soft_skills = TermMatcher::new(lex.soft_skills.iter().map(|s| (*s, ())))?;
        let buzzwords = TermMatcher::new(lex.buzzwords.iter().map(|b| (*b, ())))?;

        Ok(Self {
            dictionaries: DictionaryMatchers::new()?,
            action_verbs,
            soft_skills,
            buzzwords,
        })
    }

    pub fn dictionaries(&self) -> &DictionaryMatchers {
        &self.dictionaries
    }

    /// Build the keyword inventory for a resume.
    pub fn extract(
        &self,
        resume: &str,
        job_description: Option<&str>,
        industry: Industry,
        profile: Option<&UserProfile>,
    ) -> KeywordInventory {
        let lex = lexicon();
        let mut records: BTreeMap<String, KeywordRecord> = BTreeMap::new();

        // Dictionary terms: the first category listing a term names it.
        let dictionary_hits = self.dictionaries.scan(industry, resume);
        let mut categories_present: BTreeSet<KeywordCategory> = BTreeSet::new();
        for hit in &dictionary_hits {
            categories_present.extend(hit.tags.iter().copied());
            let category = hit.tags[0];
            insert_record(&mut records, resume, hit, category, hit.count as f64 * category.weight());
        }

        for hit in self.action_verbs.scan(resume) {
            let tier = hit.tags[0];
            let score = hit.count as f64 * tier.multiplier() * KeywordCategory::ActionVerb.weight();
            insert_record(&mut records, resume, &hit, KeywordCategory::ActionVerb, score);
        }

        for hit in self.soft_skills.scan(resume) {
            let score = hit.count as f64 * KeywordCategory::SoftSkill.weight();
            insert_record(&mut records, resume, &hit, KeywordCategory::SoftSkill, score);
        }

        for hit in self.buzzwords.scan(resume) {
            let score = BUZZWORD_BASE_SCORE * KeywordCategory::Buzzword.weight();
            insert_record(&mut records, resume, &hit, KeywordCategory::Buzzword, score);
        }

        for (term, positions, len) in structural_terms(resume) {
            if records.contains_key(&term) {
                continue;
            }
            let category = KeywordCategory::TechnicalSkill;
            records.insert(
                term.clone(),
                KeywordRecord {
                    contexts: context_snippets(resume, &positions, len),
                    score: positions.len() as f64 * category.weight(),
                    weight: category.weight(),
                    frequency: positions.len(),
                    category,
                    term,
                    similarity_score: None,
                },
            );
        }

        if let Some(profile) = profile {
            apply_profile(&mut records, profile, lex.leadership_verbs);
        }

        let mut semantic_matches = Vec::new();
        if let Some(jd) = job_description.filter(|jd| !jd.trim().is_empty()) {
            let jd_keywords = extract_jd_keywords(jd);
            for record in records.values_mut() {
                if let Some((job_term, best)) =
                    best_match(&record.term, jd_keywords.iter().map(String::as_str))
                {
                    if best > SEMANTIC_THRESHOLD {
                        record.similarity_score = Some(best);
                        if best < 1.0 {
                            semantic_matches.push(SemanticMatch {
                                resume_term: record.term.clone(),
                                job_term: job_term.to_string(),
                                similarity: best,
                            });
                        }
                    }
                }
            }
        }
        semantic_matches.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| a.resume_term.cmp(&b.resume_term))
        });
        semantic_matches.truncate(MAX_SEMANTIC_MATCHES);

        let total_occurrences: usize = records.values().map(|r| r.frequency).sum();
        let keyword_density = density(total_occurrences, word_count(resume));
        let unique_keyword_count = records.len();

        let suggestions = self.suggestions(&records, industry, job_description);
        let missing_critical =
            missing_critical(resume, &categories_present, industry, job_description);

        let mut keywords: Vec<KeywordRecord> = records.into_values().collect();
        keywords.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.term.cmp(&b.term)));
        keywords.truncate(MAX_KEYWORDS);

        log::debug!(
            "Extracted {} unique keywords ({} occurrences, density {:.1}%) for {}",
            unique_keyword_count,
            total_occurrences,
            keyword_density,
            industry
        );

        KeywordInventory {
            keywords,
            semantic_matches,
            keyword_density,
            unique_keyword_count,
            total_occurrences,
            suggestions,
            missing_critical,
        }
    }

    /// Dictionary terms the resume could add: first from its strongest
    /// categories, then terms the job description names.
    fn suggestions(
        &self,
        records: &BTreeMap<String, KeywordRecord>,
        industry: Industry,
        job_description: Option<&str>,
    ) -> Vec<String> {
        let profile = lexicon().profile(industry);

        let mut ranked: Vec<(usize, KeywordCategory, f64)> = profile
            .categories
            .iter()
            .enumerate()
            .map(|(idx, (category, _))| {
                let total = records
                    .values()
                    .filter(|r| r.category == *category)
                    .map(|r| r.score)
                    .sum::<f64>();
                (idx, *category, total)
            })
            .filter(|(_, _, total)| *total > 0.0)
            .collect();
        ranked.sort_by(|a, b| b.2.total_cmp(&a.2).then_with(|| a.0.cmp(&b.0)));

        let mut suggestions: Vec<String> = Vec::new();
        'categories: for (_, category, _) in ranked.into_iter().take(SUGGESTION_CATEGORIES) {
            for term in profile.category_terms(category) {
                if suggestions.len() >= MAX_CATEGORY_SUGGESTIONS {
                    break 'categories;
                }
                if !records.contains_key(*term) && !suggestions.iter().any(|s| s == term) {
                    suggestions.push(term.to_string());
                }
            }
        }

        if let Some(jd) = job_description {
            for hit in self.dictionaries.scan(industry, jd) {
                if suggestions.len() >= MAX_SUGGESTIONS {
                    break;
                }
                if !records.contains_key(hit.term) && !suggestions.iter().any(|s| s == hit.term) {
                    suggestions.push(hit.term.to_string());
                }
            }
        }

        suggestions
    }
}

fn insert_record<T>(
    records: &mut BTreeMap<String, KeywordRecord>,
    text: &str,
    hit: &TermHit<'_, T>,
    category: KeywordCategory,
    score: f64,
) {
    if records.contains_key(hit.term) {
        return;
    }
    records.insert(
        hit.term.to_string(),
        KeywordRecord {
            term: hit.term.to_string(),
            category,
            weight: category.weight(),
            score,
            frequency: hit.count,
            contexts: context_snippets(text, &hit.positions, hit.term.len()),
            similarity_score: None,
        },
    );
}

/// Dotted names, acronyms and `N+ years` phrases, keyed lowercase, in
/// order of first appearance.
fn structural_terms(text: &str) -> Vec<(String, Vec<usize>, usize)> {
    let section_headers = lexicon().section_headers;
    let label_lines = label_line_spans(text);
    let mut found: Vec<(String, Vec<usize>, usize)> = Vec::new();

    let dotted = DOTTED_NAME_RE.find_iter(text);
    let acronyms = ACRONYM_RE.find_iter(text).filter(|m| {
        !section_headers.contains(&m.as_str())
            && !label_lines.iter().any(|span| span.contains(&m.start()))
    });
    let years = YEARS_RE.find_iter(text);

    for m in dotted.chain(acronyms).chain(years) {
        let key = m
            .as_str()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        match found.iter_mut().find(|(term, _, _)| *term == key) {
            Some((_, positions, _)) => positions.push(m.start()),
            None => found.push((key, vec![m.start()], m.len())),
        }
    }

    found
}

/// Byte spans of section headings and the name line. Uppercase words there
/// are layout, not acronyms.
fn label_line_spans(text: &str) -> Vec<Range<usize>> {
    let name = extract_title(text).filter(|t| t.split_whitespace().count() <= MAX_NAME_WORDS);
    let mut spans = Vec::new();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if SectionType::from_heading(line).is_some() || name.as_deref() == Some(line.trim()) {
            spans.push(offset..offset + line.len());
        }
        offset += line.len();
    }

    spans
}

fn apply_profile(
    records: &mut BTreeMap<String, KeywordRecord>,
    profile: &UserProfile,
    leadership_verbs: &[&str],
) {
    for record in records.values_mut() {
        if profile.has_skill_overlap(&record.term) {
            record.score *= PROFILE_SKILL_BOOST;
        }
        if profile.seniority.is_senior()
            && record.category == KeywordCategory::ActionVerb
            && leadership_verbs.contains(&record.term.as_str())
        {
            record.score *= SENIOR_LEADERSHIP_BOOST;
        }
    }
}

/// Keyword occurrences per hundred words, to one decimal.
pub fn density(occurrences: usize, words: usize) -> f64 {
    if words == 0 {
        return 0.0;
    }
    let raw = occurrences as f64 / words as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

fn missing_critical(
    resume: &str,
    categories_present: &BTreeSet<KeywordCategory>,
    industry: Industry,
    job_description: Option<&str>,
) -> Vec<String> {
    let mut missing: Vec<String> = lexicon()
        .requirements_for(industry)
        .filter(|req| !categories_present.contains(&req.category))
        .map(|req| req.label.to_string())
        .collect();

    if let Some(jd) = job_description {
        let resume_lower = resume.to_lowercase();
        let sentences = split_sentences(jd)
            .into_iter()
            .filter(|sentence| REQUIRED_CUE_RE.is_match(sentence));

        'sentences: for sentence in sentences {
            for word in sentence.split_whitespace() {
                if missing.len() >= MAX_MISSING_CRITICAL {
                    break 'sentences;
                }
                let word = word
                    .trim_matches(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
                    .to_lowercase();
                if word.chars().count() < MIN_REQUIRED_WORD_CHARS
                    || REQUIRED_CUE_RE.is_match(&word)
                    || resume_lower.contains(&word)
                    || missing.contains(&word)
                {
                    continue;
                }
                missing.push(word);
            }
        }
    }

    missing.truncate(MAX_MISSING_CRITICAL);
    missing
}
