//! Scoring behavior across whole-resume scenarios

use ats_scorer::error::AtsScorerError;
use ats_scorer::processing::ats_checker::AtsRule;
use ats_scorer::processing::jd_matcher::{keyword_overlap, match_score};
use ats_scorer::processing::keyword_extractor::density;
use ats_scorer::processing::lexicon::Industry;
use ats_scorer::processing::scoring::{keyword_score, KeywordScoreInputs};
use ats_scorer::{AnalysisEngine, AnalysisRequest, AnalysisResult, Config};

const PLAIN_RESUME: &str = "I am a hard working person who likes to work with people and \
    computers. I have worked at a company in the city for a long time and I enjoy \
    helping my team with whatever they need.";

const STRONG_RESUME: &str = "Jane Smith\njane@example.com | (555) 123-4567\n\n\
    SUMMARY\nBackend engineer focused on reliable services.\n\n\
    EXPERIENCE\nSenior Software Engineer, Acme, Jan 2019 - 2023\n\
    • Led a platform rewrite that reduced latency 40%\n\
    • Built billing services processing $2M monthly\n\
    • Improved deploy frequency 3x\n\
    • Delivered onboarding flows for 10+ clients\n\
    • Designed alerting that reduced pages 25%\n\
    • Developed and launched internal tooling\n\n\
    EDUCATION\nBachelor of Science, State University\n\n\
    SKILLS\nRust, Python, AWS, Docker, PostgreSQL";

fn engine() -> AnalysisEngine {
    AnalysisEngine::new(&Config::default()).unwrap()
}

fn analyze(text: &str) -> AnalysisResult {
    engine().analyze(&AnalysisRequest::new(text)).unwrap()
}

fn assert_bounds(result: &AnalysisResult) {
    let s = &result.scores;
    assert!(s.keyword_score <= 100);
    assert!(s.completeness_score >= 20 && s.completeness_score <= 100);
    assert!(s.format_score >= 10 && s.format_score <= 100);
    assert!(s.overall_score <= 100);
}

#[test]
fn test_plain_paragraph_resume_scores_low() {
    let result = analyze(PLAIN_RESUME);
    let rules: Vec<AtsRule> = result.ats_findings.iter().map(|f| f.rule).collect();

    assert!(rules.contains(&AtsRule::FewBullets));
    assert!(rules.contains(&AtsRule::FewMetrics));
    assert!(rules.contains(&AtsRule::MissingSectionHeaders));
    assert!(result.scores.overall_score < 40, "{:?}", result.scores);
    assert_bounds(&result);
}

#[test]
fn test_structured_resume_is_complete() {
    let result = analyze(STRONG_RESUME);
    assert!(result.scores.completeness_score >= 80, "{:?}", result.completeness);
    assert_eq!(result.completeness.full_sections(), 3);
    assert_bounds(&result);
}

#[test]
fn test_keyword_stuffing_is_penalized() {
    let score = keyword_score(&KeywordScoreInputs {
        keyword_density: 15.0,
        unique_keywords: 10,
        job_overlap: None,
        metric_count: 3,
    });
    assert_eq!(score.density_points, -20.0);
}

#[test]
fn test_repeated_terms_trigger_stuffing_penalty() {
    // 30 keyword occurrences in exactly 100 words
    let resume = format!("{}{}", "python docker ".repeat(15), "lorem ipsum ".repeat(35));
    let request = AnalysisRequest::new(resume).with_industry(Industry::Technology);
    let result = engine().analyze(&request).unwrap();

    assert_eq!(result.word_count, 100);
    assert_eq!(result.keyword_density, 30.0);
    assert_eq!(result.keyword_breakdown.density_points, -20.0);
    assert_bounds(&result);
}

#[test]
fn test_missing_job_keywords_are_listed() {
    let request = AnalysisRequest::new("EXPERIENCE\nBuilt Docker images and Ansible playbooks.")
        .with_job_description("Experience with Kubernetes and Terraform required.");
    let result = engine().analyze(&request).unwrap();

    let job_match = result.job_match.expect("job match");
    let missing: Vec<String> = job_match
        .missing_keywords
        .iter()
        .map(|k| k.to_lowercase())
        .collect();
    assert!(missing.contains(&"kubernetes".to_string()), "{:?}", missing);
    assert!(missing.contains(&"terraform".to_string()), "{:?}", missing);
}

#[test]
fn test_empty_resume_is_rejected() {
    let err = engine().analyze(&AnalysisRequest::new("  \n ")).unwrap_err();
    assert!(matches!(err, AtsScorerError::InvalidInput(_)));
}

#[test]
fn test_density_one_decimal() {
    assert_eq!(density(50, 1000), 5.0);
    assert_eq!(density(1, 3), 33.3);
    assert_eq!(density(5, 0), 0.0);
}

#[test]
fn test_identical_inputs_serialize_identically() {
    let engine = engine();
    let request = AnalysisRequest::new(STRONG_RESUME)
        .with_job_description("Looking for Rust and Kubernetes experience. AWS required.");

    let first = serde_json::to_string(&engine.analyze(&request).unwrap()).unwrap();
    let second = serde_json::to_string(&engine.analyze(&request).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_scores_stay_in_bounds() {
    let stuffed = "python java aws docker kubernetes ".repeat(40);
    let samples = [
        PLAIN_RESUME,
        STRONG_RESUME,
        "x",
        "┌────┐\n│ table │\n└────┘",
        stuffed.as_str(),
    ];
    for text in samples {
        assert_bounds(&analyze(text));
    }
}

#[test]
fn test_adding_bullet_never_lowers_completeness() {
    let engine = engine();
    let mut resume = String::from(
        "EXPERIENCE\nSoftware Engineer, Acme, 2019 - 2023\n\nEDUCATION\nBachelor of Science\n\nSKILLS\nPython\n",
    );
    let bullets = [
        "• Led a migration to AWS",
        "• Built reporting tools",
        "• Improved test coverage",
        "• Reduced build times",
        "• Designed a caching layer",
    ];

    let mut previous = engine
        .analyze(&AnalysisRequest::new(resume.clone()))
        .unwrap()
        .scores
        .completeness_score;
    for bullet in bullets {
        resume = resume.replacen("\n\nEDUCATION", &format!("\n{}\n\nEDUCATION", bullet), 1);
        let current = engine
            .analyze(&AnalysisRequest::new(resume.clone()))
            .unwrap()
            .scores
            .completeness_score;
        assert!(current >= previous, "{} < {} after adding {}", current, previous, bullet);
        previous = current;
    }
}

#[test]
fn test_job_overlap_monotonic_in_matches() {
    for total in 1..=30usize {
        let mut last_overlap = 0;
        let mut last_score = 0;
        for matched in 0..=total {
            let overlap = keyword_overlap(matched, total);
            let score = match_score(overlap, matched, total - matched);
            assert!(overlap >= last_overlap);
            assert!(score >= last_score);
            last_overlap = overlap;
            last_score = score;
        }
    }
}
