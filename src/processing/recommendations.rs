//! Prioritized, role-aware improvement advice

use crate::processing::ats_checker::{AtsFinding, Severity};
use crate::processing::jd_matcher::JobMatch;
use crate::processing::keyword_extractor::KeywordRecord;
use crate::processing::lexicon::{lexicon, Industry};
use crate::processing::scoring::ScoreBreakdown;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const MAX_RECOMMENDATIONS: usize = 10;
const MAX_MISSING_KEYWORDS: usize = 20;
const MAX_LISTED_TERMS: usize = 5;

const MIN_METRICS: usize = 3;
const LOW_DENSITY: f64 = 3.0;
const STUFFED_DENSITY: f64 = 12.0;
const MIN_JOB_MATCH: u32 = 60;
const MIN_FORMAT: u32 = 70;
const MIN_COMPLETENESS: u32 = 70;
const INDUSTRY_MATCH_SCALE: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Format,
    Keywords,
    Metrics,
    JobMatch,
    Content,
}

impl std::fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RecommendationCategory::Format => "Format",
            RecommendationCategory::Keywords => "Keywords",
            RecommendationCategory::Metrics => "Metrics",
            RecommendationCategory::JobMatch => "Job match",
            RecommendationCategory::Content => "Content",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub priority: Severity,
    pub message: String,
    pub actionable: String,
    /// Sort weight only; not a score delta.
    pub impact: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKeywordSource {
    CriticalRequirement,
    JobDescription,
    Suggestion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingKeyword {
    pub keyword: String,
    pub priority: Severity,
    pub impact: u32,
    pub source: MissingKeywordSource,
}

/// Industry-specific phrasing for advice.
struct RolePhrasing {
    metric_examples: &'static str,
    content_focus: &'static str,
}

fn role_phrasing(industry: Industry) -> RolePhrasing {
    match industry {
        Industry::Technology => RolePhrasing {
            metric_examples: "Show scale and performance: \"Cut p99 latency 40%\", \"Served 2M requests/day\", \"Reduced cloud spend by $120K\"",
            content_focus: "Name the tech stack in each role and describe system design, testing and deployment work",
        },
        Industry::Healthcare => RolePhrasing {
            metric_examples: "Show patient impact: \"Cared for 6 ICU patients per shift\", \"Cut medication errors 30%\", \"Raised HCAHPS scores 15%\"",
            content_focus: "List licenses and certifications prominently and describe unit, caseload and clinical systems",
        },
        Industry::Finance => RolePhrasing {
            metric_examples: "Show financial results: \"Managed a $50M portfolio\", \"Closed books 3 days faster\", \"Identified $1.2M in savings\"",
            content_focus: "Highlight modeling, reporting and compliance work along with certifications (CPA, CFA)",
        },
        Industry::Sales => RolePhrasing {
            metric_examples: "Show quota results: \"Achieved 130% of quota\", \"Generated $2M in pipeline\", \"Grew account base 45%\"",
            content_focus: "Describe deal sizes, sales cycles and the CRM and methodology you used",
        },
        Industry::Marketing => RolePhrasing {
            metric_examples: "Show campaign results: \"Raised CTR 35%\", \"Cut CAC by $40\", \"Grew organic traffic 3x\"",
            content_focus: "Describe channels, campaign results and the analytics tools behind your decisions",
        },
    }
}

/// Everything upstream stages found, borrowed for advice generation.
pub struct RecommendationInputs<'a> {
    pub ats_findings: &'a [AtsFinding],
    pub missing_critical: &'a [String],
    pub suggestions: &'a [String],
    pub metric_count: usize,
    pub keyword_density: f64,
    pub job_match: Option<&'a JobMatch>,
    pub scores: &'a ScoreBreakdown,
    pub industry: Industry,
}

pub fn generate_recommendations(inputs: &RecommendationInputs<'_>) -> Vec<Recommendation> {
    let phrasing = role_phrasing(inputs.industry);
    let mut recommendations = Vec::new();

    for finding in inputs.ats_findings {
        let impact = match finding.severity {
            Severity::Critical => 20,
            Severity::High => 15,
            _ => continue,
        };
        recommendations.push(Recommendation {
            category: RecommendationCategory::Format,
            priority: finding.severity,
            message: finding.issue.clone(),
            actionable: finding.fix.clone(),
            impact,
        });
    }

    if !inputs.missing_critical.is_empty() {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Keywords,
            priority: Severity::High,
            message: format!(
                "Missing critical keywords: {}",
                list_terms(inputs.missing_critical)
            ),
            actionable: "Add these where you genuinely have the experience, ideally in your skills section and most recent role".to_string(),
            impact: 18,
        });
    }

    if inputs.metric_count < MIN_METRICS {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Metrics,
            priority: Severity::High,
            message: format!(
                "Only {} quantified achievement{} found",
                inputs.metric_count,
                if inputs.metric_count == 1 { "" } else { "s" }
            ),
            actionable: phrasing.metric_examples.to_string(),
            impact: 16,
        });
    }

    if inputs.keyword_density < LOW_DENSITY {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Keywords,
            priority: Severity::Medium,
            message: format!("Keyword density is low ({:.1}%)", inputs.keyword_density),
            actionable: "Work more industry terms into your bullets and skills section; aim for 3-8%".to_string(),
            impact: 12,
        });
    } else if inputs.keyword_density > STUFFED_DENSITY {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Keywords,
            priority: Severity::High,
            message: format!("Keyword stuffing detected ({:.1}% density)", inputs.keyword_density),
            actionable: "Cut repeated terms and show each skill in context instead of listing it again".to_string(),
            impact: 14,
        });
    }

    if let Some(job_match) = inputs.job_match {
        if job_match.match_score < MIN_JOB_MATCH {
            let actionable = if job_match.missing_keywords.is_empty() {
                "Mirror the job description's wording for the skills you have".to_string()
            } else {
                format!(
                    "Address these job requirements: {}",
                    list_terms(&job_match.missing_keywords)
                )
            };
            recommendations.push(Recommendation {
                category: RecommendationCategory::JobMatch,
                priority: Severity::High,
                message: format!("Job description match is only {}%", job_match.match_score),
                actionable,
                impact: 20,
            });
        }
    }

    if !inputs.suggestions.is_empty() {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Keywords,
            priority: Severity::Medium,
            message: "Consider adding related industry keywords".to_string(),
            actionable: format!("Relevant terms: {}", list_terms(inputs.suggestions)),
            impact: 10,
        });
    }

    if inputs.scores.format_score < MIN_FORMAT {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Format,
            priority: Severity::High,
            message: format!("Format score is {}/100", inputs.scores.format_score),
            actionable: "Use a single-column layout with standard headers, bullet points and dated roles".to_string(),
            impact: 15,
        });
    }

    if inputs.scores.completeness_score < MIN_COMPLETENESS {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Content,
            priority: Severity::Medium,
            message: format!("Completeness score is {}/100", inputs.scores.completeness_score),
            actionable: phrasing.content_focus.to_string(),
            impact: 12,
        });
    }

    let mut seen = HashSet::new();
    recommendations.retain(|r| seen.insert((r.category, r.message.clone())));
    recommendations.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| b.impact.cmp(&a.impact)));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

/// Merge every source of missing keywords, most important first.
pub fn missing_keywords(
    missing_critical: &[String],
    job_match: Option<&JobMatch>,
    suggestions: &[String],
) -> Vec<MissingKeyword> {
    let job_missing = job_match.map(|m| m.missing_keywords.as_slice()).unwrap_or(&[]);

    let sources = [
        (missing_critical, Severity::Critical, 20, MissingKeywordSource::CriticalRequirement),
        (job_missing, Severity::High, 18, MissingKeywordSource::JobDescription),
        (suggestions, Severity::Medium, 10, MissingKeywordSource::Suggestion),
    ];

    let mut seen = HashSet::new();
    sources
        .iter()
        .flat_map(|(keywords, priority, impact, source)| {
            keywords.iter().map(move |keyword| MissingKeyword {
                keyword: keyword.clone(),
                priority: *priority,
                impact: *impact,
                source: *source,
            })
        })
        .filter(|m| seen.insert(m.keyword.to_lowercase()))
        .take(MAX_MISSING_KEYWORDS)
        .collect()
}

/// How much of the industry dictionary shows up among the top keywords, scaled to 0-100.
pub fn industry_match_score(keywords: &[KeywordRecord], industry: Industry) -> u32 {
    let profile = lexicon().profile(industry);
    let dictionary: HashSet<&str> = profile.terms().map(|(_, term)| term).collect();
    if dictionary.is_empty() {
        return 0;
    }

    let present = keywords
        .iter()
        .filter(|k| dictionary.contains(k.term.as_str()))
        .count();
    let share = present as f64 / dictionary.len() as f64;
    (share * 100.0 * INDUSTRY_MATCH_SCALE).round().min(100.0) as u32
}

fn list_terms(terms: &[String]) -> String {
    terms
        .iter()
        .take(MAX_LISTED_TERMS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
