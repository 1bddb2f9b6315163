//! Text extraction from resume and job description files

use crate::error::{AtsScorerError, Result};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

/// List items are rendered with this marker so bullet detection still sees them.
const LIST_MARKER: &str = "• ";

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            AtsScorerError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;

        if text.trim().is_empty() {
            log::warn!(
                "PDF '{}' has no text layer; scanned documents are not supported",
                path.display()
            );
        }
        Ok(normalize_text(&text))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(normalize_text(&content))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown = fs::read_to_string(path).await?;
        Ok(normalize_text(&markdown_to_text(&markdown)))
    }
}

/// Strip Markdown syntax, keeping headings and list items on their own lines.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Item) => {
                start_line(&mut out);
                out.push_str(LIST_MARKER);
            }
            Event::Start(Tag::Heading(..)) | Event::Start(Tag::Paragraph) | Event::Rule => {
                start_line(&mut out);
            }
            Event::End(Tag::Heading(..)) => out.push_str("\n\n"),
            Event::End(Tag::Paragraph) | Event::End(Tag::Item) => out.push('\n'),
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            _ => {}
        }
    }

    out
}

fn start_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') && !out.ends_with(LIST_MARKER) {
        out.push('\n');
    }
}

/// Unify line endings, trim trailing spaces and collapse runs of blank lines.
pub fn normalize_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace(['\r', '\u{0c}'], "\n");

    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0;
    for line in unified.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
            lines.push("");
        } else {
            blank_run = 0;
            lines.push(line);
        }
    }

    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_keeps_structure() {
        let md = "# Jane Doe\n\n## Experience\n\n- Led **platform** team\n- Cut costs `30%`\n\nPlain paragraph.";
        let text = markdown_to_text(md);
        assert!(text.contains("Jane Doe\n"));
        assert!(text.contains("Experience\n"));
        assert!(text.contains("• Led platform team\n"));
        assert!(text.contains("• Cut costs 30%\n"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_loose_list_items_keep_marker() {
        let text = markdown_to_text("- first\n\n- second\n");
        assert!(text.contains("• first"));
        assert!(text.contains("• second"));
    }

    #[test]
    fn test_normalize_text() {
        let raw = "Line one   \r\n\r\n\r\n\r\nLine two\u{0c}Line three\n\n";
        assert_eq!(normalize_text(raw), "Line one\n\nLine two\nLine three");
    }
}
