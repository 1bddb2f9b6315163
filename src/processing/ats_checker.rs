//! ATS (Applicant Tracking System) parsing compatibility checks

use crate::error::Result;
use crate::processing::lexicon::lexicon;
use crate::processing::term_matcher::TermMatcher;
use crate::processing::text_processor::TextSignals;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const STARTING_SCORE: i32 = 100;
const MIN_HEADERS: usize = 3;
const MIN_BULLETS: usize = 5;
const MIN_DATE_SIGNALS: usize = 2;
const MIN_METRICS: usize = 3;
const MIN_STRONG_VERBS: usize = 3;

const ATS_HEADERS: [&str; 5] = ["EXPERIENCE", "EDUCATION", "SKILLS", "SUMMARY", "PROJECTS"];

/// (capitalized, any case) whole-word patterns per standard header.
static HEADER_PATTERNS: Lazy<Vec<(Regex, Regex)>> = Lazy::new(|| {
    ATS_HEADERS
        .iter()
        .map(|header| {
            let lower = header.to_lowercase();
            let title = format!("{}{}", &header[..1], &lower[1..]);
            let capitalized = Regex::new(&format!(r"\b(?:{}|{})\b", header, title))
                .expect("Invalid header regex");
            let any_case =
                Regex::new(&format!(r"(?i)\b{}\b", lower)).expect("Invalid header regex");
            (capitalized, any_case)
        })
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

/// Each check, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtsRule {
    TableCharacters,
    HeadersNotCapitalized,
    MissingSectionHeaders,
    MissingEmail,
    MissingPhone,
    FewBullets,
    MissingDates,
    CoarseDates,
    FewMetrics,
    WeakActionVerbs,
}

impl AtsRule {
    pub fn deduction(&self) -> i32 {
        match self {
            AtsRule::TableCharacters => 20,
            AtsRule::HeadersNotCapitalized => 5,
            AtsRule::MissingSectionHeaders => 15,
            AtsRule::MissingEmail => 10,
            AtsRule::MissingPhone => 5,
            AtsRule::FewBullets => 10,
            AtsRule::MissingDates => 10,
            AtsRule::CoarseDates => 5,
            AtsRule::FewMetrics => 12,
            AtsRule::WeakActionVerbs => 8,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            AtsRule::TableCharacters => Severity::Critical,
            AtsRule::MissingSectionHeaders
            | AtsRule::MissingEmail
            | AtsRule::MissingDates
            | AtsRule::FewMetrics => Severity::High,
            AtsRule::HeadersNotCapitalized
            | AtsRule::MissingPhone
            | AtsRule::FewBullets
            | AtsRule::CoarseDates
            | AtsRule::WeakActionVerbs => Severity::Medium,
        }
    }

    fn finding(self, issue: &str, fix: &str, location: &str, impact: &str) -> AtsFinding {
        AtsFinding {
            rule: self,
            issue: issue.to_string(),
            severity: self.severity(),
            fix: fix.to_string(),
            location: location.to_string(),
            impact: impact.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsFinding {
    pub rule: AtsRule,
    pub issue: String,
    pub severity: Severity,
    pub fix: String,
    pub location: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsReport {
    pub score: u32,
    pub findings: Vec<AtsFinding>,
}

pub struct AtsChecker {
    strong_verbs: TermMatcher<()>,
}

impl AtsChecker {
    pub fn new() -> Result<Self> {
        let strong_verbs = TermMatcher::new(lexicon().strong_verbs.iter().map(|v| (*v, ())))?;
        Ok(Self { strong_verbs })
    }

    /// Run every rule in order; each contributes at most one finding.
    pub fn check_compatibility(&self, text: &str, signals: &TextSignals) -> AtsReport {
        let mut findings = Vec::new();

        if signals.has_table_characters {
            findings.push(AtsRule::TableCharacters.finding(
                "Contains table borders or box-drawing characters",
                "Use simple bullet points instead of tables or borders",
                "Throughout document",
                "ATS parsers scramble or drop text inside tables",
            ));
        }

        let (capitalized, any_case) = count_headers(text);
        if capitalized < MIN_HEADERS {
            if any_case >= MIN_HEADERS {
                findings.push(AtsRule::HeadersNotCapitalized.finding(
                    "Section headers are not capitalized",
                    "Write headers as 'EXPERIENCE', 'EDUCATION', 'SKILLS'",
                    "Section headers",
                    "Some ATS only recognize sections by their standard capitalized names",
                ));
            } else {
                findings.push(AtsRule::MissingSectionHeaders.finding(
                    "Missing standard section headers (Experience, Education, Skills)",
                    "Add clear section headers like 'EXPERIENCE', 'EDUCATION', 'SKILLS'",
                    "Section headers",
                    "Content outside recognized sections may be misfiled or ignored",
                ));
            }
        }

        if !signals.has_email {
            findings.push(AtsRule::MissingEmail.finding(
                "No email address detected",
                "Add an email address in a standard format",
                "Contact information",
                "Recruiters cannot reach you and the ATS profile is incomplete",
            ));
        }

        if !signals.has_phone {
            findings.push(AtsRule::MissingPhone.finding(
                "No phone number detected",
                "Add a phone number in standard format (123-456-7890)",
                "Contact information",
                "Contact fields stay empty in the candidate record",
            ));
        }

        if signals.bullet_count < MIN_BULLETS {
            findings.push(AtsRule::FewBullets.finding(
                "Limited use of bullet points for achievements",
                "Use bullet points to highlight key achievements and responsibilities",
                "Experience",
                "Dense paragraphs are harder to parse into individual achievements",
            ));
        }

        let dates = signals.dates;
        if dates.total() < MIN_DATE_SIGNALS {
            findings.push(AtsRule::MissingDates.finding(
                "Employment dates are missing or unreadable",
                "Add dates to every role (e.g. 'Jan 2020 - Dec 2023')",
                "Experience",
                "The ATS cannot compute tenure or recency without dates",
            ));
        } else if dates.only_year_ranges() {
            findings.push(AtsRule::CoarseDates.finding(
                "Dates only show years",
                "Include months in date ranges (e.g. '03/2020 - 06/2023')",
                "Experience",
                "Year-only ranges make tenure calculations imprecise",
            ));
        }

        if signals.metric_count < MIN_METRICS {
            findings.push(AtsRule::FewMetrics.finding(
                "Few quantified achievements",
                "Add numbers: percentages, dollar amounts, team sizes, growth multiples",
                "Experience",
                "Recruiters screening ranked results skip resumes without measurable impact",
            ));
        }

        if self.strong_verbs.count_distinct(text) < MIN_STRONG_VERBS {
            findings.push(AtsRule::WeakActionVerbs.finding(
                "Limited use of strong action verbs",
                "Start bullet points with strong action verbs (Achieved, Improved, Led)",
                "Experience",
                "Weak phrasing lowers relevance ranking for achievement-focused searches",
            ));
        }

        let deductions: i32 = findings.iter().map(|f| f.rule.deduction()).sum();
        let score = (STARTING_SCORE - deductions).max(0) as u32;

        log::debug!("ATS compatibility score {} with {} findings", score, findings.len());

        AtsReport { score, findings }
    }
}

/// Standard headers found capitalized and in any case.
fn count_headers(text: &str) -> (usize, usize) {
    HEADER_PATTERNS
        .iter()
        .fold((0, 0), |(capitalized, any_case), (cap_re, any_re)| {
            (
                capitalized + usize::from(cap_re.is_match(text)),
                any_case + usize::from(any_re.is_match(text)),
            )
        })
}
