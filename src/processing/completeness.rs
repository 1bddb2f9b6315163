//! Completeness scoring: does the resume carry substance, not just headings

use crate::error::Result;
use crate::processing::document::{Document, SectionType};
use crate::processing::keyword_extractor::DictionaryMatchers;
use crate::processing::lexicon::{lexicon, Industry};
use crate::processing::term_matcher::TermMatcher;
use crate::processing::text_processor::{has_year_range, TextSignals};
use serde::{Deserialize, Serialize};

const EXPERIENCE_FULL: i32 = 30;
const EXPERIENCE_PARTIAL: i32 = 10;
const EDUCATION_FULL: i32 = 20;
const EDUCATION_PARTIAL: i32 = 5;
const SKILLS_FULL: i32 = 20;
const SKILLS_PARTIAL: i32 = 5;
const THIN_CORE_PENALTY: i32 = -20;
const MIN_FULL_SECTIONS: usize = 2;

const MIN_SCORE: i32 = 20;
const MAX_SCORE: i32 = 100;

const MINOR_SECTIONS: [(SectionType, i32); 4] = [
    (SectionType::Projects, 3),
    (SectionType::Certifications, 3),
    (SectionType::Awards, 2),
    (SectionType::Languages, 2),
];

/// How much credit a core section earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionCredit {
    Full,
    HeaderOnly,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub score: u32,
    pub experience: SectionCredit,
    pub education: SectionCredit,
    pub skills: SectionCredit,
    pub bullet_points: i32,
    pub metrics: i32,
    pub action_verbs: i32,
    pub minor_sections: i32,
    pub length: i32,
}

impl CompletenessReport {
    pub fn full_sections(&self) -> usize {
        [self.experience, self.education, self.skills]
            .iter()
            .filter(|c| **c == SectionCredit::Full)
            .count()
    }
}

pub struct CompletenessScorer {
    job_titles: TermMatcher<()>,
    entry_level: TermMatcher<()>,
    degrees: TermMatcher<()>,
    strong_verbs: TermMatcher<()>,
}

impl CompletenessScorer {
    pub fn new() -> Result<Self> {
        let lex = lexicon();
        let unit = |terms: &'static [&'static str]| TermMatcher::new(terms.iter().map(|t| (*t, ())));
        Ok(Self {
            job_titles: unit(lex.job_titles)?,
            entry_level: unit(lex.entry_level_markers)?,
            degrees: unit(lex.degree_terms)?,
            strong_verbs: unit(lex.strong_verbs)?,
        })
    }

    pub fn score_completeness(
        &self,
        text: &str,
        signals: &TextSignals,
        industry: Industry,
        dictionaries: &DictionaryMatchers,
    ) -> CompletenessReport {
        let document = Document::parse(text);

        let experience = credit(document.section(SectionType::Experience).map(|s| {
            let content = s.content.as_str();
            (self.job_titles.contains_any(content) || self.entry_level.contains_any(content))
                && has_year_range(content)
        }));

        let education = credit(
            document
                .section(SectionType::Education)
                .map(|s| self.degrees.contains_any(&s.content)),
        );

        let skills = credit(document.section(SectionType::Skills).map(|s| {
            let recognized = |i: Industry| {
                dictionaries
                    .get(i)
                    .map_or(false, |m| m.contains_any(&s.content))
            };
            recognized(industry) || recognized(Industry::Technology)
        }));

        let mut core = section_points(experience, EXPERIENCE_FULL, EXPERIENCE_PARTIAL)
            + section_points(education, EDUCATION_FULL, EDUCATION_PARTIAL)
            + section_points(skills, SKILLS_FULL, SKILLS_PARTIAL);

        let full_sections = [experience, education, skills]
            .iter()
            .filter(|c| **c == SectionCredit::Full)
            .count();
        if full_sections < MIN_FULL_SECTIONS {
            core += THIN_CORE_PENALTY;
        }

        let bullet_points = match signals.bullet_count {
            n if n >= 5 => 15,
            n if n >= 3 => 8,
            _ => -10,
        };

        let metrics = match signals.metric_count {
            n if n >= 4 => 20,
            n if n >= 2 => 12,
            n if n >= 1 => 6,
            _ => -15,
        };

        let action_verbs = match self.strong_verbs.count_all(text) {
            n if n >= 8 => 10,
            n if n >= 4 => 5,
            _ => -5,
        };

        let minor_sections = MINOR_SECTIONS
            .iter()
            .filter(|(section, _)| document.has_section(*section))
            .map(|(_, points)| points)
            .sum::<i32>();

        let length = match signals.word_count {
            n if n < 150 => -15,
            n if n < 300 => -5,
            n if n < 500 => 0,
            n if n < 800 => 5,
            _ => 3,
        };

        let raw = core + bullet_points + metrics + action_verbs + minor_sections + length;
        let score = raw.clamp(MIN_SCORE, MAX_SCORE) as u32;

        log::debug!(
            "Completeness {} (raw {}): experience {:?}, education {:?}, skills {:?}",
            score,
            raw,
            experience,
            education,
            skills
        );

        CompletenessReport {
            score,
            experience,
            education,
            skills,
            bullet_points,
            metrics,
            action_verbs,
            minor_sections,
            length,
        }
    }
}

fn credit(section: Option<bool>) -> SectionCredit {
    match section {
        Some(true) => SectionCredit::Full,
        Some(false) => SectionCredit::HeaderOnly,
        None => SectionCredit::Missing,
    }
}

fn section_points(credit: SectionCredit, full: i32, partial: i32) -> i32 {
    match credit {
        SectionCredit::Full => full,
        SectionCredit::HeaderOnly => partial,
        SectionCredit::Missing => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str, industry: Industry) -> CompletenessReport {
        let scorer = CompletenessScorer::new().unwrap();
        let dictionaries = DictionaryMatchers::new().unwrap();
        scorer.score_completeness(text, &TextSignals::from_text(text), industry, &dictionaries)
    }

    const FULL_RESUME: &str = "EXPERIENCE\n\
        Senior Software Engineer, Acme, Jan 2019 - 2023\n\
        • Led a platform rewrite that cut latency 40%\n\
        • Built billing services processing $2M monthly\n\
        • Improved deploy frequency 3x\n\
        • Delivered onboarding flows for 10+ clients\n\
        • Designed alerting that reduced pages 25%\n\
        • Developed internal tooling\n\n\
        EDUCATION\nBachelor of Science, State University\n\n\
        SKILLS\nRust, Python, AWS, Docker\n\n\
        PROJECTS\nOpen source contributions";

    #[test]
    fn test_full_credit_sections() {
        let report = score(FULL_RESUME, Industry::Technology);
        assert_eq!(report.experience, SectionCredit::Full);
        assert_eq!(report.education, SectionCredit::Full);
        assert_eq!(report.skills, SectionCredit::Full);
        assert_eq!(report.bullet_points, 15);
        assert_eq!(report.metrics, 20);
        assert_eq!(report.minor_sections, 3);
        assert_eq!(report.full_sections(), 3);
        assert!(report.score >= 80, "score was {}", report.score);
    }

    #[test]
    fn test_header_only_sections() {
        let text = "EXPERIENCE\nStuff happened\n\nEDUCATION\nSome learning\n\nSKILLS\nBeing nice";
        let report = score(text, Industry::Technology);
        assert_eq!(report.experience, SectionCredit::HeaderOnly);
        assert_eq!(report.education, SectionCredit::HeaderOnly);
        assert_eq!(report.skills, SectionCredit::HeaderOnly);
        // 10 + 5 + 5 - 20 - 10 - 15 - 5 - 15 clamps to the floor
        assert_eq!(report.score, 20);
    }

    #[test]
    fn test_entry_level_experience_counts() {
        let text = "EXPERIENCE\nSummer Intern, Clinic, 2022 - 2023\n";
        let report = score(text, Industry::Healthcare);
        assert_eq!(report.experience, SectionCredit::Full);
    }

    #[test]
    fn test_skills_fall_back_to_technology_dictionary() {
        let text = "SKILLS\nPython and SQL\n";
        let report = score(text, Industry::Healthcare);
        assert_eq!(report.skills, SectionCredit::Full);
    }

    #[test]
    fn test_missing_everything_hits_floor() {
        let report = score("hello", Industry::Sales);
        assert_eq!(report.experience, SectionCredit::Missing);
        assert_eq!(report.score, 20);
    }

    #[test]
    fn test_length_bands() {
        let filler = "word ".repeat(600);
        let report = score(&filler, Industry::Technology);
        assert_eq!(report.length, 5);
        let filler = "word ".repeat(900);
        assert_eq!(score(&filler, Industry::Technology).length, 3);
    }

    #[test]
    fn test_bullet_crossing_800_words_costs_length_credit() {
        use crate::processing::text_processor::word_count;

        let base = "EXPERIENCE\n\
            Senior Software Engineer, Acme, 2019 - 2023\n\
            • Led a platform rewrite that cut latency 40%\n\
            • Built billing services processing $2M monthly\n\
            • Improved deploy frequency 3x\n\n\
            EDUCATION\nBachelor of Science\n\n\
            SKILLS\nRust, Python\n\n\
            PROJECTS\n";
        let padded = format!("{}{}", base, "word ".repeat(798 - word_count(base)));
        let with_bullet = padded.replacen("\n\nEDUCATION", "\n• Documentation\n\nEDUCATION", 1);
        assert_eq!(word_count(&padded), 798);
        assert_eq!(word_count(&with_bullet), 800);

        let before = score(&padded, Industry::Technology);
        let after = score(&with_bullet, Industry::Technology);

        // the 4th bullet stays in the 3-4 band while the length band drops 5 -> 3
        assert_eq!(before.bullet_points, 8);
        assert_eq!(after.bullet_points, 8);
        assert_eq!(before.length, 5);
        assert_eq!(after.length, 3);
        assert_eq!(before.score, after.score + 2);
    }
}
