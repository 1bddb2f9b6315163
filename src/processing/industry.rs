//! Industry classification by dictionary term counts

use crate::error::Result;
use crate::processing::lexicon::{lexicon, Industry};
use crate::processing::term_matcher::TermMatcher;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DETECTION_THRESHOLD: usize = 3;

/// How the analysis industry was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndustrySource {
    Override,
    Detected,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryClassification {
    pub industry: Industry,
    pub source: IndustrySource,
    /// Term occurrence totals per industry, in lexicon order. Empty for overrides.
    pub scores: Vec<(Industry, usize)>,
}

pub struct IndustryClassifier {
    matcher: TermMatcher<Industry>,
    threshold: usize,
    default_industry: Industry,
}

impl IndustryClassifier {
    pub fn new(default_industry: Industry, threshold: usize) -> Result<Self> {
        // Every category contributes, so a term listed twice counts twice.
        let entries = lexicon()
            .industries
            .iter()
            .flat_map(|profile| profile.terms().map(move |(_, term)| (term, profile.industry)));

        Ok(Self {
            matcher: TermMatcher::new(entries)?,
            threshold,
            default_industry,
        })
    }

    /// Per-industry occurrence totals for `text`.
    pub fn score(&self, text: &str) -> Vec<(Industry, usize)> {
        let mut totals: Vec<(Industry, usize)> = Industry::ALL.iter().map(|i| (*i, 0)).collect();
        for hit in self.matcher.scan(text) {
            for industry in hit.tags {
                if let Some(entry) = totals.iter_mut().find(|(i, _)| i == industry) {
                    entry.1 += hit.count;
                }
            }
        }
        totals
    }

    /// Resolve the industry for a resume.
    ///
    /// An override wins outright. Otherwise the highest total wins, with ties
    /// going to the earlier industry, provided it clears the threshold;
    /// below it the fallback (or the configured default) is used.
    pub fn classify(
        &self,
        text: &str,
        override_industry: Option<Industry>,
        fallback: Option<Industry>,
    ) -> IndustryClassification {
        if let Some(industry) = override_industry {
            return IndustryClassification {
                industry,
                source: IndustrySource::Override,
                scores: Vec::new(),
            };
        }

        let scores = self.score(text);
        let mut best: Option<(Industry, usize)> = None;
        for &(industry, total) in &scores {
            if best.map_or(true, |(_, t)| total > t) {
                best = Some((industry, total));
            }
        }

        match best {
            Some((industry, total)) if total > self.threshold => {
                log::debug!("Detected industry {} with {} term hits", industry, total);
                IndustryClassification {
                    industry,
                    source: IndustrySource::Detected,
                    scores,
                }
            }
            _ => {
                let industry = fallback.unwrap_or(self.default_industry);
                log::warn!(
                    "Industry signal too weak (threshold {}), falling back to {}",
                    self.threshold,
                    industry
                );
                IndustryClassification {
                    industry,
                    source: IndustrySource::Fallback,
                    scores,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IndustryClassifier {
        IndustryClassifier::new(Industry::Technology, DEFAULT_DETECTION_THRESHOLD).unwrap()
    }

    #[test]
    fn test_detects_healthcare() {
        let text = "RN with BLS and ACLS. ICU and telemetry nurse charting in Epic.";
        let result = classifier().classify(text, None, None);
        assert_eq!(result.industry, Industry::Healthcare);
        assert_eq!(result.source, IndustrySource::Detected);
    }

    #[test]
    fn test_override_wins() {
        let text = "Python, Java, Rust, AWS, Docker, Kubernetes";
        let result = classifier().classify(text, Some(Industry::Sales), None);
        assert_eq!(result.industry, Industry::Sales);
        assert_eq!(result.source, IndustrySource::Override);
    }

    #[test]
    fn test_threshold_falls_back() {
        // three finance hits is not more than the threshold
        let text = "Budgeting, forecasting and valuation.";
        let result = classifier().classify(text, None, None);
        assert_eq!(result.source, IndustrySource::Fallback);
        assert_eq!(result.industry, Industry::Technology);

        let result = classifier().classify(text, None, Some(Industry::Marketing));
        assert_eq!(result.industry, Industry::Marketing);
    }

    #[test]
    fn test_duplicate_terms_count_per_category() {
        // docker and kubernetes each sit in two technology categories
        let scores = classifier().score("docker kubernetes");
        assert_eq!(scores[0], (Industry::Technology, 4));
    }

    #[test]
    fn test_tie_goes_to_earlier_industry() {
        // "python" counts for technology and finance, "sql" for finance only,
        // "rust" and "go" for technology only.
        let scores = classifier().score("python sql rust");
        let tech = scores.iter().find(|(i, _)| *i == Industry::Technology).unwrap().1;
        let finance = scores.iter().find(|(i, _)| *i == Industry::Finance).unwrap().1;
        assert_eq!(tech, 2);
        assert_eq!(finance, 2);

        let result =
            IndustryClassifier::new(Industry::Marketing, 1).unwrap().classify("python sql rust", None, None);
        assert_eq!(result.industry, Industry::Technology);
        assert_eq!(result.source, IndustrySource::Detected);
    }
}
