//! Optional candidate profile supplied alongside a resume

use crate::processing::lexicon::Industry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Junior,
    #[default]
    Mid,
    Senior,
    Lead,
}

impl Seniority {
    /// Senior and lead candidates get extra credit for leadership verbs.
    pub fn is_senior(&self) -> bool {
        matches!(self, Seniority::Senior | Seniority::Lead)
    }
}

/// Read-only hints about the candidate. Never modified by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub industry: Option<Industry>,
    #[serde(default)]
    pub seniority: Seniority,
    #[serde(default)]
    pub top_skills: Vec<String>,
}

impl UserProfile {
    /// True when `term` and one of the top skills share a whole run of words,
    /// so "React" matches "React Native" but "Java" never matches "JavaScript".
    pub fn has_skill_overlap(&self, term: &str) -> bool {
        let term = tokens(term);
        if term.is_empty() {
            return false;
        }
        self.top_skills
            .iter()
            .map(|skill| tokens(skill))
            .filter(|skill| !skill.is_empty())
            .any(|skill| contains_run(&skill, &term) || contains_run(&term, &skill))
    }
}

fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || matches!(c, ',' | '/' | '(' | ')'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    needle.len() <= haystack.len() && haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_overlap() {
        let profile = UserProfile {
            top_skills: vec!["Kubernetes".to_string(), "React Native".to_string(), " ".to_string()],
            ..Default::default()
        };
        assert!(profile.has_skill_overlap("kubernetes"));
        assert!(profile.has_skill_overlap("react"));
        assert!(!profile.has_skill_overlap("terraform"));
        assert!(!profile.has_skill_overlap(""));
    }

    #[test]
    fn test_skill_overlap_needs_whole_words() {
        let profile = UserProfile {
            top_skills: vec!["Go".to_string(), "Java".to_string(), "Node.js".to_string()],
            ..Default::default()
        };
        assert!(profile.has_skill_overlap("go"));
        assert!(profile.has_skill_overlap("java"));
        assert!(profile.has_skill_overlap("node.js"));
        assert!(!profile.has_skill_overlap("django"));
        assert!(!profile.has_skill_overlap("google cloud"));
        assert!(!profile.has_skill_overlap("javascript"));
        assert!(!profile.has_skill_overlap("node"));
    }

    #[test]
    fn test_profile_deserializes_with_defaults() {
        let profile: UserProfile = serde_json::from_str(r#"{"seniority": "lead"}"#).unwrap();
        assert_eq!(profile.seniority, Seniority::Lead);
        assert!(profile.seniority.is_senior());
        assert!(profile.industry.is_none());
        assert!(profile.top_skills.is_empty());
    }
}
