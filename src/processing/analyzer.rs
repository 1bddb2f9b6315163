//! Analysis engine: the single entry point that runs every scoring stage

use crate::config::Config;
use crate::error::{AtsScorerError, Result};
use crate::processing::ats_checker::{AtsChecker, AtsFinding};
use crate::processing::completeness::{CompletenessReport, CompletenessScorer};
use crate::processing::industry::{IndustryClassifier, IndustrySource};
use crate::processing::jd_matcher::{match_against_jd, JobMatch};
use crate::processing::keyword_extractor::{KeywordExtractor, KeywordRecord, SemanticMatch};
use crate::processing::lexicon::{Industry, LEXICON_VERSION};
use crate::processing::profile::UserProfile;
use crate::processing::recommendations::{
    generate_recommendations, industry_match_score, missing_keywords, MissingKeyword,
    Recommendation, RecommendationInputs,
};
use crate::processing::scoring::{
    aggregate, format_score, keyword_score, ExternalPrediction, KeywordScore, KeywordScoreInputs,
    ScoreBreakdown,
};
use crate::processing::text_processor::TextSignals;
use serde::{Deserialize, Serialize};

/// Everything one analysis needs. Serializes to the cache key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub resume: String,
    pub job_description: Option<String>,
    pub industry: Option<Industry>,
    pub profile: Option<UserProfile>,
    pub prediction: Option<ExternalPrediction>,
}

impl AnalysisRequest {
    pub fn new(resume: impl Into<String>) -> Self {
        Self {
            resume: resume.into(),
            job_description: None,
            industry: None,
            profile: None,
            prediction: None,
        }
    }

    pub fn with_job_description(mut self, job_description: impl Into<String>) -> Self {
        self.job_description = Some(job_description.into());
        self
    }

    pub fn with_industry(mut self, industry: Industry) -> Self {
        self.industry = Some(industry);
        self
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_prediction(mut self, prediction: ExternalPrediction) -> Self {
        self.prediction = Some(prediction);
        self
    }

    /// Job description text, if any non-blank one was given.
    fn job_text(&self) -> Option<&str> {
        self.job_description
            .as_deref()
            .filter(|jd| !jd.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub scores: ScoreBreakdown,
    /// Where the keyword sub-score's points came from.
    pub keyword_breakdown: KeywordScore,
    /// ATS checker score before the format floor.
    pub ats_compatibility_score: u32,
    pub keywords: Vec<KeywordRecord>,
    pub semantic_matches: Vec<SemanticMatch>,
    pub keyword_density: f64,
    pub unique_keyword_count: usize,
    pub missing_keywords: Vec<MissingKeyword>,
    pub ats_findings: Vec<AtsFinding>,
    pub recommendations: Vec<Recommendation>,
    pub industry: Industry,
    pub industry_source: IndustrySource,
    pub industry_match_score: u32,
    pub job_match: Option<JobMatch>,
    pub completeness: CompletenessReport,
    pub word_count: usize,
    pub lexicon_version: String,
}

/// Owns the compiled matchers; build once and share.
pub struct AnalysisEngine {
    extractor: KeywordExtractor,
    classifier: IndustryClassifier,
    ats_checker: AtsChecker,
    completeness: CompletenessScorer,
}

impl AnalysisEngine {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            extractor: KeywordExtractor::new()?,
            classifier: IndustryClassifier::new(
                config.engine.default_industry,
                config.engine.detection_threshold,
            )?,
            ats_checker: AtsChecker::new()?,
            completeness: CompletenessScorer::new()?,
        })
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let resume = request.resume.as_str();
        if resume.trim().is_empty() {
            return Err(AtsScorerError::InvalidInput(
                "Resume text is empty".to_string(),
            ));
        }

        let job_description = request.job_text();
        log::info!(
            "Analyzing resume ({} chars, job description: {})",
            resume.len(),
            if job_description.is_some() { "yes" } else { "no" }
        );

        let signals = TextSignals::from_text(resume);

        let profile_industry = request.profile.as_ref().and_then(|p| p.industry);
        let classification = self
            .classifier
            .classify(resume, request.industry, profile_industry);
        let industry = classification.industry;
        log::debug!("Industry {} ({:?})", industry, classification.source);

        let inventory =
            self.extractor
                .extract(resume, job_description, industry, request.profile.as_ref());

        let ats = self.ats_checker.check_compatibility(resume, &signals);

        let job_match = job_description.map(|jd| {
            match_against_jd(inventory.keywords.iter().map(|k| k.term.as_str()), jd)
        });

        let completeness = self.completeness.score_completeness(
            resume,
            &signals,
            industry,
            self.extractor.dictionaries(),
        );

        let keyword = keyword_score(&KeywordScoreInputs {
            keyword_density: inventory.keyword_density,
            unique_keywords: inventory.unique_keyword_count,
            job_overlap: job_match.as_ref().map(|m| m.keyword_overlap),
            metric_count: signals.metric_count,
        });
        log::debug!("Keyword sub-score {:?}", keyword);

        let scores = aggregate(
            keyword.total,
            completeness.score,
            format_score(ats.score),
            request.prediction.as_ref(),
        );

        let recommendations = generate_recommendations(&RecommendationInputs {
            ats_findings: &ats.findings,
            missing_critical: &inventory.missing_critical,
            suggestions: &inventory.suggestions,
            metric_count: signals.metric_count,
            keyword_density: inventory.keyword_density,
            job_match: job_match.as_ref(),
            scores: &scores,
            industry,
        });

        let missing_keywords = missing_keywords(
            &inventory.missing_critical,
            job_match.as_ref(),
            &inventory.suggestions,
        );

        let industry_match_score = industry_match_score(&inventory.keywords, industry);

        log::info!(
            "Analysis complete: overall {}, keyword {}, completeness {}, format {}",
            scores.overall_score,
            scores.keyword_score,
            scores.completeness_score,
            scores.format_score
        );

        Ok(AnalysisResult {
            scores,
            keyword_breakdown: keyword,
            ats_compatibility_score: ats.score,
            keywords: inventory.keywords,
            semantic_matches: inventory.semantic_matches,
            keyword_density: inventory.keyword_density,
            unique_keyword_count: inventory.unique_keyword_count,
            missing_keywords,
            ats_findings: ats.findings,
            recommendations,
            industry,
            industry_source: classification.source,
            industry_match_score,
            job_match,
            completeness,
            word_count: signals.word_count,
            lexicon_version: LEXICON_VERSION.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_empty_resume_is_invalid() {
        let engine = engine();
        for text in ["", "   \n\t  "] {
            let err = engine.analyze(&AnalysisRequest::new(text)).unwrap_err();
            assert!(matches!(err, AtsScorerError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_blank_job_description_is_ignored() {
        let request = AnalysisRequest::new("EXPERIENCE\nBuilt Python services")
            .with_job_description("   ");
        let result = engine().analyze(&request).unwrap();
        assert!(result.job_match.is_none());
    }

    #[test]
    fn test_industry_override_and_profile_fallback() {
        let engine = engine();
        let request = AnalysisRequest::new("Python and Rust developer")
            .with_industry(Industry::Finance);
        let result = engine.analyze(&request).unwrap();
        assert_eq!(result.industry, Industry::Finance);
        assert_eq!(result.industry_source, IndustrySource::Override);

        let profile = UserProfile {
            industry: Some(Industry::Sales),
            ..UserProfile::default()
        };
        let result = engine
            .analyze(&AnalysisRequest::new("hello there").with_profile(profile))
            .unwrap();
        assert_eq!(result.industry, Industry::Sales);
        assert_eq!(result.industry_source, IndustrySource::Fallback);
    }

    #[test]
    fn test_scores_in_bounds() {
        let result = engine()
            .analyze(&AnalysisRequest::new("┌┐ just a line"))
            .unwrap();
        assert!(result.scores.format_score >= 10);
        assert!(result.scores.overall_score <= 100);
        assert!(result.ats_compatibility_score <= result.scores.format_score);
        assert_eq!(result.lexicon_version, LEXICON_VERSION);
    }
}
