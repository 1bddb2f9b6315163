//! Report structure wrapping an analysis result with run metadata

use crate::processing::analyzer::AnalysisResult;
use crate::processing::completeness::SectionCredit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

const STRONG_SUB_SCORE: u32 = 80;

/// Everything a renderer needs for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: ReportSummary,
    pub metadata: ReportMetadata,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub overall_score: u32,
    pub verdict: String,
    pub strengths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub resume_file: String,
    pub job_file: Option<String>,
    pub scorer_version: String,
    pub lexicon_version: String,
}

impl AnalysisReport {
    pub fn new(analysis: AnalysisResult, resume_file: &Path, job_file: Option<&Path>) -> Self {
        let metadata = ReportMetadata {
            generated_at: Utc::now(),
            resume_file: resume_file.display().to_string(),
            job_file: job_file.map(|p| p.display().to_string()),
            scorer_version: env!("CARGO_PKG_VERSION").to_string(),
            lexicon_version: analysis.lexicon_version.clone(),
        };
        let summary = ReportSummary {
            overall_score: analysis.scores.overall_score,
            verdict: verdict(analysis.scores.overall_score).to_string(),
            strengths: strengths(&analysis),
        };

        Self {
            summary,
            metadata,
            analysis,
        }
    }
}

pub fn verdict(score: u32) -> &'static str {
    match score {
        90..=100 => "Excellent: ready for most applicant tracking systems",
        80..=89 => "Very good: a few targeted edits will help",
        70..=79 => "Good: solid base with clear improvements available",
        60..=69 => "Fair: several issues may hurt ATS ranking",
        50..=59 => "Below average: significant revisions recommended",
        _ => "Poor: likely to be filtered out by ATS screening",
    }
}

fn strengths(analysis: &AnalysisResult) -> Vec<String> {
    let scores = &analysis.scores;
    let mut strengths = Vec::new();

    if scores.format_score >= STRONG_SUB_SCORE {
        strengths.push("Clean, ATS-readable formatting".to_string());
    }
    if scores.keyword_score >= STRONG_SUB_SCORE {
        strengths.push(format!(
            "Strong {} keyword coverage ({} unique keywords)",
            analysis.industry, analysis.unique_keyword_count
        ));
    }
    if analysis.completeness.full_sections() == 3 {
        strengths.push("Experience, education and skills sections are all substantive".to_string());
    } else if analysis.completeness.experience == SectionCredit::Full {
        strengths.push("Well-documented work experience".to_string());
    }
    if let Some(job_match) = &analysis.job_match {
        if job_match.match_score >= STRONG_SUB_SCORE {
            strengths.push(format!(
                "Close match to the job description ({}%)",
                job_match.match_score
            ));
        }
    }

    strengths
}
