//! Surface-level text signals: words, bullets, metrics, dates, contact details

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

const CONTEXT_RADIUS: usize = 50;
pub const MAX_CONTEXTS: usize = 3;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
        .expect("Invalid phone regex")
});

static BULLET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:[•·●○◦▪▫■□◆◇★☆][ \t]*|[\-\*][ \t]+)\S").expect("Invalid bullet regex")
});

static METRIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d+(?:\.\d+)?\s?-\s?\d+(?:\.\d+)?%|\d+(?:\.\d+)?%|\$\s?\d[\d,]*(?:\.\d+)?\s?[kmb]?\b|\b\d+(?:\.\d+)?x\b|\b\d+\+",
    )
    .expect("Invalid metric regex")
});

static YEAR_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:19|20)\d{2}\s*[-–—]\s*(?:(?:19|20)\d{2}\b|present\b|current\b)")
        .expect("Invalid year range regex")
});

static NUMERIC_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}/\d{4}\b").expect("Invalid numeric date regex"));

static MONTH_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+\d{4}\b",
    )
    .expect("Invalid month-year regex")
});

static TABLE_CHARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[│┤╡╢╖╕╣║╗╝╜╛┐└┴┬├─┼╞╟╚╔╩╦╠═╬╧╨╤╥╙╘╒╓╫╪┘┌]")
        .expect("Invalid table character regex")
});

/// Date evidence found in a document, split by notation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSignals {
    pub numeric: usize,
    pub month_year: usize,
    pub year_ranges: usize,
}

impl DateSignals {
    pub fn total(&self) -> usize {
        self.numeric + self.month_year + self.year_ranges
    }

    /// True when every date is a bare `YYYY - YYYY` range.
    pub fn only_year_ranges(&self) -> bool {
        self.year_ranges > 0 && self.numeric == 0 && self.month_year == 0
    }
}

/// Everything the checkers need from the raw text, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSignals {
    pub word_count: usize,
    pub bullet_count: usize,
    pub metric_count: usize,
    pub dates: DateSignals,
    pub has_email: bool,
    pub has_phone: bool,
    pub has_table_characters: bool,
}

impl TextSignals {
    pub fn from_text(text: &str) -> Self {
        Self {
            word_count: word_count(text),
            bullet_count: bullet_count(text),
            metric_count: metric_count(text),
            dates: date_signals(text),
            has_email: has_email(text),
            has_phone: has_phone(text),
            has_table_characters: has_table_characters(text),
        }
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lines that open with a bullet glyph, dash or asterisk. Glyphs may touch
/// the text ("•Led"); a dash or asterisk needs a space after it.
pub fn bullet_count(text: &str) -> usize {
    BULLET_RE.find_iter(text).count()
}

/// Quantified achievements: percentages, dollar amounts, multipliers, `N+`.
pub fn metric_count(text: &str) -> usize {
    METRIC_RE.find_iter(text).count()
}

pub fn date_signals(text: &str) -> DateSignals {
    DateSignals {
        numeric: NUMERIC_DATE_RE.find_iter(text).count(),
        month_year: MONTH_YEAR_RE.find_iter(text).count(),
        year_ranges: YEAR_RANGE_RE.find_iter(text).count(),
    }
}

pub fn has_year_range(text: &str) -> bool {
    YEAR_RANGE_RE.is_match(text)
}

pub fn has_email(text: &str) -> bool {
    EMAIL_RE.is_match(text)
}

pub fn has_phone(text: &str) -> bool {
    PHONE_RE.is_match(text)
}

pub fn has_table_characters(text: &str) -> bool {
    TABLE_CHARS_RE.is_match(text)
}

/// Split text into trimmed, non-empty sentences
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Up to three short snippets around the given byte offsets.
pub fn context_snippets(text: &str, positions: &[usize], term_len: usize) -> Vec<String> {
    positions
        .iter()
        .take(MAX_CONTEXTS)
        .map(|&pos| {
            let start = floor_boundary(text, pos.saturating_sub(CONTEXT_RADIUS));
            let end = ceil_boundary(text, pos + term_len + CONTEXT_RADIUS);
            text[start..end].split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .collect()
}

fn floor_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("  one two\nthree\tfour  "), 4);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_bullet_count() {
        let text = "EXPERIENCE\n• Led a team\n- Built tools\n  * Shipped code\n▪ Cut costs\nPlain line\n-not a bullet";
        assert_eq!(bullet_count(text), 4);
    }

    #[test]
    fn test_bullet_glyph_without_space() {
        let text = "•Led a team\n●Built tools\n-Shipped code\n*Cut costs";
        assert_eq!(bullet_count(text), 2);
    }

    #[test]
    fn test_metric_count() {
        let text = "Grew revenue 40%, saved $2M, 3x faster, 10+ engineers, cut churn 10-20%.";
        assert_eq!(metric_count(text), 5);
        assert_eq!(metric_count("No numbers here"), 0);
    }

    #[test]
    fn test_date_signals() {
        let dates = date_signals("Jan 2020 - Present\n03/2018 - 12/2019\n2015 - 2017");
        assert_eq!(dates.month_year, 1);
        assert_eq!(dates.numeric, 2);
        // "2020 - Present" also reads as a range
        assert_eq!(dates.year_ranges, 2);
        assert_eq!(dates.total(), 5);
        assert!(!dates.only_year_ranges());

        let ranges = date_signals("2015 - 2017\n2018 – Present");
        assert_eq!(ranges.year_ranges, 2);
        assert!(ranges.only_year_ranges());
    }

    #[test]
    fn test_contact_detection() {
        let text = "Contact me at john.doe@email.com or call (555) 123-4567";
        assert!(has_email(text));
        assert!(has_phone(text));
        assert!(!has_email("no address"));
        assert!(!has_phone("call me maybe"));
    }

    #[test]
    fn test_table_characters() {
        assert!(has_table_characters("┌────┐\n│ Skills │"));
        assert!(!has_table_characters("| Skills | Rust |"));
    }

    #[test]
    fn test_context_snippets_respect_char_boundaries() {
        let text = "Résumé ✓ ".repeat(20) + "Kubernetes" + &" ✓ naïve".repeat(20);
        let pos = text.find("Kubernetes").unwrap();
        let snippets = context_snippets(&text, &[pos, pos, pos, pos], "Kubernetes".len());
        assert_eq!(snippets.len(), MAX_CONTEXTS);
        assert!(snippets[0].contains("Kubernetes"));
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("Led a team. Built tools!  ");
        assert_eq!(sentences, vec!["Led a team.", "Built tools!"]);
        // dotted names do not end a sentence
        assert_eq!(split_sentences("Node.js required. Go too.").len(), 2);
    }
}
