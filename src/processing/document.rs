//! Resume structure: title and section detection

use serde::{Deserialize, Serialize};

/// Longest line (in words) still treated as a section heading.
const MAX_HEADING_WORDS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Experience,
    Education,
    Skills,
    Summary,
    Projects,
    Certifications,
    Awards,
    Languages,
}

impl SectionType {
    fn patterns(&self) -> &'static [&'static str] {
        match self {
            SectionType::Experience => &[
                "experience",
                "work experience",
                "professional experience",
                "employment",
                "work history",
                "career history",
            ],
            SectionType::Education => &["education", "academic background", "qualifications"],
            SectionType::Skills => &["skills", "technical skills", "core competencies", "expertise"],
            SectionType::Summary => &[
                "summary",
                "professional summary",
                "profile",
                "objective",
                "about me",
                "overview",
            ],
            SectionType::Projects => &["projects", "portfolio", "notable projects"],
            SectionType::Certifications => &[
                "certifications",
                "certification",
                "certificates",
                "licenses",
            ],
            SectionType::Awards => &["awards", "honors", "achievements"],
            SectionType::Languages => &["languages"],
        }
    }

    const ALL: [SectionType; 8] = [
        SectionType::Experience,
        SectionType::Education,
        SectionType::Skills,
        SectionType::Summary,
        SectionType::Projects,
        SectionType::Certifications,
        SectionType::Awards,
        SectionType::Languages,
    ];

    /// Classify a line as a heading, if it is one.
    pub fn from_heading(line: &str) -> Option<SectionType> {
        let cleaned = line
            .trim()
            .trim_start_matches('#')
            .trim()
            .trim_end_matches(':')
            .trim()
            .to_lowercase();

        if cleaned.is_empty() || cleaned.split_whitespace().count() > MAX_HEADING_WORDS {
            return None;
        }

        Self::ALL.into_iter().find(|section| {
            section
                .patterns()
                .iter()
                .any(|pattern| cleaned == *pattern || cleaned.starts_with(&format!("{} ", pattern)))
        })
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionType::Experience => write!(f, "Experience"),
            SectionType::Education => write!(f, "Education"),
            SectionType::Skills => write!(f, "Skills"),
            SectionType::Summary => write!(f, "Summary"),
            SectionType::Projects => write!(f, "Projects"),
            SectionType::Certifications => write!(f, "Certifications"),
            SectionType::Awards => write!(f, "Awards"),
            SectionType::Languages => write!(f, "Languages"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub section_type: SectionType,
    pub heading: String,
    /// Body text between this heading and the next one.
    pub content: String,
    pub start_index: usize,
    pub end_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: Option<String>,
    pub sections: Vec<DocumentSection>,
    pub word_count: usize,
}

impl Document {
    pub fn parse(content: &str) -> Self {
        Self {
            title: extract_title(content),
            sections: detect_sections(content),
            word_count: content.split_whitespace().count(),
        }
    }

    /// First section of the given type.
    pub fn section(&self, section_type: SectionType) -> Option<&DocumentSection> {
        self.sections.iter().find(|s| s.section_type == section_type)
    }

    pub fn has_section(&self, section_type: SectionType) -> bool {
        self.section(section_type).is_some()
    }
}

/// Extract the document title from the first few lines
pub fn extract_title(content: &str) -> Option<String> {
    content
        .lines()
        .take(5)
        .map(str::trim)
        .find(|line| {
            line.len() > 3
                && line.len() < 100
                && !line.contains('@')
                && !line.starts_with('-')
                && SectionType::from_heading(line).is_none()
        })
        .map(str::to_string)
}

fn detect_sections(content: &str) -> Vec<DocumentSection> {
    let mut headings: Vec<(usize, usize, SectionType, &str)> = Vec::new();
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        if let Some(section_type) = SectionType::from_heading(line) {
            headings.push((offset, offset + line.len(), section_type, line.trim()));
        }
        offset += line.len();
    }

    headings
        .iter()
        .enumerate()
        .map(|(i, &(start_index, body_start, section_type, heading))| {
            let end_index = headings
                .get(i + 1)
                .map(|next| next.0)
                .unwrap_or(content.len());
            DocumentSection {
                section_type,
                heading: heading.to_string(),
                content: content[body_start..end_index].trim().to_string(),
                start_index,
                end_index,
            }
        })
        .collect()
}
