//! Output formatters: console, JSON and Markdown renderings of a report

use crate::config::OutputFormat;
use crate::error::{AtsScorerError, Result};
use crate::output::report::AnalysisReport;
use crate::processing::ats_checker::Severity;
use crate::processing::completeness::SectionCredit;
use crate::processing::industry::IndustrySource;
use colored::{Color, Colorize};
use std::path::Path;

const SUMMARY_KEYWORDS: usize = 10;
const DETAILED_KEYWORDS: usize = 25;

pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
    detailed: bool,
}

/// Picks the formatter for a requested output format.
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn source_label(source: IndustrySource) -> &'static str {
    match source {
        IndustrySource::Override => "specified",
        IndustrySource::Detected => "detected",
        IndustrySource::Fallback => "default",
    }
}

fn credit_label(credit: SectionCredit) -> &'static str {
    match credit {
        SectionCredit::Full => "complete",
        SectionCredit::HeaderOnly => "header only",
        SectionCredit::Missing => "missing",
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn score_color(score: u32) -> Color {
        match score {
            80..=100 => Color::Green,
            60..=79 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn format_score(&self, label: &str, score: u32) -> String {
        let value = format!("{:>3}/100", score);
        format!("  {:<22}{}\n", label, self.colorize(&value, Self::score_color(score)))
    }

    fn severity_icon(&self, severity: Severity) -> String {
        if self.use_colors {
            let (icon, color) = match severity {
                Severity::Critical => ("CRITICAL", Color::BrightRed),
                Severity::High => ("HIGH", Color::Red),
                Severity::Medium => ("MEDIUM", Color::Yellow),
                Severity::Low => ("LOW", Color::Green),
            };
            format!("[{}]", icon.color(color).bold())
        } else {
            let icon = match severity {
                Severity::Critical => "[!]",
                Severity::High => "[*]",
                Severity::Medium => "[-]",
                Severity::Low => "[+]",
            };
            icon.to_string()
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let analysis = &report.analysis;
        let scores = &analysis.scores;
        let mut output = String::new();

        output.push_str(&self.format_header("ATS COMPATIBILITY ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Resume: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.resume_file
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&self.format_score("Overall score", scores.overall_score));
        output.push_str(&format!("  Verdict: {}\n", self.colorize(&report.summary.verdict, Color::Cyan)));
        output.push_str(&format!(
            "  Industry: {} ({}), match {}%\n",
            analysis.industry,
            source_label(analysis.industry_source),
            analysis.industry_match_score
        ));

        output.push_str(&self.format_header("Score Breakdown", 3));
        output.push_str(&self.format_score("Keywords (50%)", scores.keyword_score));
        output.push_str(&self.format_score("Completeness (30%)", scores.completeness_score));
        output.push_str(&self.format_score("Format (20%)", scores.format_score));
        output.push_str(&format!(
            "  Keyword density {:.1}% across {} words\n",
            analysis.keyword_density, analysis.word_count
        ));

        if let Some(job_match) = &analysis.job_match {
            output.push_str(&self.format_header("Job Description Match", 3));
            output.push_str(&self.format_score("Match score", job_match.match_score));
            output.push_str(&format!(
                "  Matched {} of {} keywords ({}%)\n",
                job_match.matched_keywords.len(),
                job_match.total_keywords,
                job_match.keyword_overlap
            ));
            if !job_match.missing_keywords.is_empty() {
                output.push_str(&format!(
                    "  Missing: {}\n",
                    self.colorize(&job_match.missing_keywords.join(", "), Color::Red)
                ));
            }
        }

        if !report.summary.strengths.is_empty() {
            output.push_str(&self.format_header("Strengths", 2));
            for strength in &report.summary.strengths {
                output.push_str(&format!("  + {}\n", self.colorize(strength, Color::Green)));
            }
        }

        if !analysis.ats_findings.is_empty() {
            output.push_str(&self.format_header("ATS Issues", 2));
            for finding in &analysis.ats_findings {
                output.push_str(&format!(
                    "  {} {} ({})\n      Fix: {}\n",
                    self.severity_icon(finding.severity),
                    finding.issue,
                    finding.location,
                    finding.fix
                ));
                if self.detailed {
                    output.push_str(&format!("      Why: {}\n", finding.impact));
                }
            }
        }

        if !analysis.recommendations.is_empty() {
            output.push_str(&self.format_header("Recommendations", 2));
            for (i, rec) in analysis.recommendations.iter().enumerate() {
                output.push_str(&format!(
                    "  {}. {} [{}] {}\n     {}\n",
                    i + 1,
                    self.severity_icon(rec.priority),
                    rec.category,
                    rec.message,
                    rec.actionable
                ));
            }
        }

        if !analysis.missing_keywords.is_empty() {
            output.push_str(&self.format_header("Missing Keywords", 3));
            let terms: Vec<&str> = analysis
                .missing_keywords
                .iter()
                .map(|m| m.keyword.as_str())
                .collect();
            output.push_str(&format!("  {}\n", terms.join(", ")));
        }

        output.push_str(&self.format_header("Top Keywords", 3));
        if self.detailed {
            for keyword in analysis.keywords.iter().take(DETAILED_KEYWORDS) {
                output.push_str(&format!(
                    "  {:<24} {:<22} x{:<3} score {:.2}\n",
                    keyword.term,
                    keyword.category.as_str(),
                    keyword.frequency,
                    keyword.score
                ));
            }
        } else {
            let terms: Vec<&str> = analysis
                .keywords
                .iter()
                .take(SUMMARY_KEYWORDS)
                .map(|k| k.term.as_str())
                .collect();
            output.push_str(&format!("  {}\n", terms.join(", ")));
        }

        if self.detailed {
            let completeness = &analysis.completeness;
            output.push_str(&self.format_header("Completeness Detail", 3));
            output.push_str(&format!(
                "  Experience: {} | Education: {} | Skills: {}\n",
                credit_label(completeness.experience),
                credit_label(completeness.education),
                credit_label(completeness.skills)
            ));
            output.push_str(&format!(
                "  Bullets {:+} | Metrics {:+} | Action verbs {:+} | Extra sections {:+} | Length {:+}\n",
                completeness.bullet_points,
                completeness.metrics,
                completeness.action_verbs,
                completeness.minor_sections,
                completeness.length
            ));

            if !analysis.semantic_matches.is_empty() {
                output.push_str(&self.format_header("Related Terms", 3));
                for m in &analysis.semantic_matches {
                    output.push_str(&format!(
                        "  {} ~ {} ({:.0}%)\n",
                        m.resume_term,
                        m.job_term,
                        m.similarity * 100.0
                    ));
                }
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, detailed: bool) -> Self {
        Self {
            include_metadata,
            detailed,
        }
    }

    fn markdown_score_badge(score: u32) -> &'static str {
        match score {
            90..=100 => "🟢 Excellent",
            80..=89 => "🟡 Very Good",
            70..=79 => "🟠 Good",
            60..=69 => "🔴 Fair",
            50..=59 => "🔴 Below Average",
            _ => "🔴 Poor",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let analysis = &report.analysis;
        let scores = &analysis.scores;
        let mut output = String::new();

        output.push_str("# ATS Compatibility Report\n\n");

        if self.include_metadata {
            let resume_name = Path::new(&report.metadata.resume_file)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| report.metadata.resume_file.clone());
            output.push_str(&format!(
                "**Generated:** {} | **Resume:** `{}`\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                resume_name
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Overall Score:** {}/100 {}\n\n",
            scores.overall_score,
            Self::markdown_score_badge(scores.overall_score)
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", report.summary.verdict));
        output.push_str(&format!(
            "**Industry:** {} ({}), industry match {}%\n\n",
            analysis.industry,
            source_label(analysis.industry_source),
            analysis.industry_match_score
        ));

        output.push_str("| Component | Score | Weight |\n");
        output.push_str("|-----------|-------|--------|\n");
        output.push_str(&format!("| Keywords | {} | 50% |\n", scores.keyword_score));
        output.push_str(&format!("| Completeness | {} | 30% |\n", scores.completeness_score));
        output.push_str(&format!("| Format | {} | 20% |\n\n", scores.format_score));

        if let Some(job_match) = &analysis.job_match {
            output.push_str("## Job Description Match\n\n");
            output.push_str(&format!(
                "**Match score:** {}/100, {} of {} keywords matched ({}%)\n\n",
                job_match.match_score,
                job_match.matched_keywords.len(),
                job_match.total_keywords,
                job_match.keyword_overlap
            ));
            if !job_match.missing_keywords.is_empty() {
                output.push_str(&format!(
                    "**Missing:** `{}`\n\n",
                    job_match.missing_keywords.join("`, `")
                ));
            }
        }

        if !report.summary.strengths.is_empty() {
            output.push_str("## Strengths\n\n");
            for strength in &report.summary.strengths {
                output.push_str(&format!("- {}\n", strength));
            }
            output.push('\n');
        }

        if !analysis.ats_findings.is_empty() {
            output.push_str("## ATS Issues\n\n");
            output.push_str("| Severity | Issue | Location | Fix |\n");
            output.push_str("|----------|-------|----------|-----|\n");
            for finding in &analysis.ats_findings {
                output.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    finding.severity, finding.issue, finding.location, finding.fix
                ));
            }
            output.push('\n');
        }

        if !analysis.recommendations.is_empty() {
            output.push_str("## Recommendations\n\n");
            for (i, rec) in analysis.recommendations.iter().enumerate() {
                output.push_str(&format!(
                    "{}. **{}** ({}, {})\n   {}\n",
                    i + 1,
                    rec.message,
                    rec.category,
                    rec.priority,
                    rec.actionable
                ));
            }
            output.push('\n');
        }

        if !analysis.missing_keywords.is_empty() {
            output.push_str("## Missing Keywords\n\n");
            for missing in &analysis.missing_keywords {
                output.push_str(&format!("- `{}` ({})\n", missing.keyword, missing.priority));
            }
            output.push('\n');
        }

        output.push_str("## Top Keywords\n\n");
        let limit = if self.detailed { DETAILED_KEYWORDS } else { SUMMARY_KEYWORDS };
        output.push_str("| Keyword | Category | Frequency | Score |\n");
        output.push_str("|---------|----------|-----------|-------|\n");
        for keyword in analysis.keywords.iter().take(limit) {
            output.push_str(&format!(
                "| {} | {} | {} | {:.2} |\n",
                keyword.term,
                keyword.category.as_str(),
                keyword.frequency,
                keyword.score
            ));
        }
        output.push('\n');

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by ats-scorer v{} (lexicon {})*\n",
                report.metadata.scorer_version, report.metadata.lexicon_version
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata, detailed),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        };
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content).map_err(|e| {
        AtsScorerError::OutputFormatting(format!(
            "Failed to write report to {}: {}",
            file_path.display(),
            e
        ))
    })
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };
    format!("{}_ats{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::analyzer::{AnalysisEngine, AnalysisRequest};
    use std::path::PathBuf;

    const RESUME: &str = "Jane Smith\njane@example.com | (555) 123-4567\n\n\
        EXPERIENCE\nSoftware Engineer, Acme, Jan 2020 - Present\n\
        • Led migration of Python services to AWS, cutting costs 30%\n\
        • Built Docker pipelines serving 2M users\n\n\
        EDUCATION\nBachelor of Science\n\nSKILLS\nPython, Rust, AWS";

    fn report() -> AnalysisReport {
        let engine = AnalysisEngine::new(&Config::default()).unwrap();
        let request = AnalysisRequest::new(RESUME)
            .with_job_description("Experience with Kubernetes and Terraform required.");
        let analysis = engine.analyze(&request).unwrap();
        AnalysisReport::new(analysis, &PathBuf::from("resumes/jane.txt"), None)
    }

    #[test]
    fn test_console_without_colors() {
        let report = report();
        let text = ConsoleFormatter::new(false, true).format_report(&report).unwrap();
        assert!(text.contains("ATS COMPATIBILITY ANALYSIS"));
        assert!(text.contains("Overall score"));
        assert!(text.contains("Job Description Match"));
        assert!(text.contains("Completeness Detail"));
        assert!(!text.contains("\u{1b}["));
    }

    #[test]
    fn test_json_round_trips_scores() {
        let report = report();
        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["analysis"]["scores"]["overall_score"],
            serde_json::json!(report.analysis.scores.overall_score)
        );
        assert_eq!(value["analysis"]["industry"], "technology");
    }

    #[test]
    fn test_markdown_sections() {
        let report = report();
        let md = MarkdownFormatter::new(true, false).format_report(&report).unwrap();
        assert!(md.starts_with("# ATS Compatibility Report"));
        assert!(md.contains("**Resume:** `jane.txt`"));
        assert!(md.contains("| Keywords |"));
        assert!(md.contains("## Job Description Match"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false, true, false);
        let report = report();
        let json = generator.generate_report(&report, OutputFormat::Json).unwrap();
        assert!(json.trim_start().starts_with('{'));
        let md = generator.generate_report(&report, OutputFormat::Markdown).unwrap();
        assert!(!md.contains("Generated by"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(OutputFormat::Json, "/tmp/jane_resume.pdf", false),
            "jane_resume_ats.json"
        );
        let stamped = suggest_filename(OutputFormat::Markdown, "cv.txt", true);
        assert!(stamped.starts_with("cv_ats_") && stamped.ends_with(".md"));
    }

    #[test]
    fn test_save_report_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.md");
        save_report_to_file("# hi", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# hi");
    }
}
