//! Integration tests for the ATS scorer

use ats_scorer::error::AtsScorerError;
use ats_scorer::input::InputManager;
use ats_scorer::output::{AnalysisReport, ReportGenerator};
use ats_scorer::processing::industry::IndustrySource;
use ats_scorer::processing::lexicon::Industry;
use ats_scorer::processing::profile::{Seniority, UserProfile};
use ats_scorer::{AnalysisEngine, AnalysisRequest, Config};
use ats_scorer::config::OutputFormat;
use std::path::Path;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    // List items survive as bullets
    assert!(text.contains("• Led a team of 5 engineers"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_missing_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nope.txt")).await;
    assert!(matches!(result, Err(AtsScorerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.docx");
    std::fs::write(&path, "binary-ish").unwrap();

    let mut manager = InputManager::new().with_cache(false);
    let result = manager.extract_text(&path).await;
    assert!(matches!(result, Err(AtsScorerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_invalid_pdf_reports_extraction_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.pdf");
    std::fs::write(&path, "this is not a pdf").unwrap();

    let mut manager = InputManager::new();
    let result = manager.extract_text(&path).await;
    assert!(matches!(result, Err(AtsScorerError::PdfExtraction(_))));
}

#[tokio::test]
async fn test_end_to_end_against_job_description() {
    let mut manager = InputManager::new();
    let resume = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job = manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();

    let engine = AnalysisEngine::new(&Config::default()).unwrap();
    let result = engine
        .analyze(&AnalysisRequest::new(resume).with_job_description(job))
        .unwrap();

    assert_eq!(result.industry, Industry::Technology);
    assert_eq!(result.industry_source, IndustrySource::Detected);

    let job_match = result.job_match.as_ref().expect("job match");
    let lower = |v: &[String]| v.iter().map(|s| s.to_lowercase()).collect::<Vec<_>>();
    assert!(lower(&job_match.matched_keywords).contains(&"kubernetes".to_string()));
    assert!(lower(&job_match.missing_keywords).contains(&"terraform".to_string()));

    assert!(result.keywords.iter().any(|k| k.term == "react"));
    assert!(result.keywords.iter().any(|k| k.term == "node.js"));
    assert!(result.scores.overall_score > 50, "{:?}", result.scores);
    assert!(result.recommendations.len() <= 10);
    assert!(result.missing_keywords.len() <= 20);
}

#[test]
fn test_profile_boosts_matching_skills() {
    let resume = std::fs::read_to_string("tests/fixtures/sample_resume.txt").unwrap();
    let engine = AnalysisEngine::new(&Config::default()).unwrap();

    let plain = engine.analyze(&AnalysisRequest::new(resume.clone())).unwrap();
    let profile = UserProfile {
        industry: None,
        seniority: Seniority::Senior,
        top_skills: vec!["Redis".to_string()],
    };
    let boosted = engine
        .analyze(&AnalysisRequest::new(resume).with_profile(profile.clone()))
        .unwrap();

    let score = |keywords: &[ats_scorer::processing::keyword_extractor::KeywordRecord]| {
        keywords.iter().find(|k| k.term == "redis").map(|k| k.score)
    };
    let before = score(&plain.keywords).expect("redis present");
    let after = score(&boosted.keywords).expect("redis present");
    assert!((after - before * 1.3).abs() < 1e-9);

    // the profile itself is left untouched
    assert_eq!(profile.top_skills, vec!["Redis".to_string()]);
}

#[test]
fn test_report_renders_every_format() {
    let resume = std::fs::read_to_string("tests/fixtures/sample_resume.txt").unwrap();
    let engine = AnalysisEngine::new(&Config::default()).unwrap();
    let analysis = engine.analyze(&AnalysisRequest::new(resume)).unwrap();
    let report = AnalysisReport::new(analysis, Path::new("tests/fixtures/sample_resume.txt"), None);

    let generator = ReportGenerator::with_options(false, true, true, true);
    for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown] {
        let rendered = generator.generate_report(&report, format).unwrap();
        assert!(!rendered.is_empty());
    }
}
