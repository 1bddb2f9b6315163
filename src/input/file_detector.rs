//! Input file type detection

use crate::error::{AtsScorerError, Result};
use std::fmt;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub const SUPPORTED_EXTENSIONS: [&'static str; 5] = ["txt", "text", "md", "markdown", "pdf"];

    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Detect by extension; a path without one is an input error.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                AtsScorerError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;
        Ok(Self::from_extension(extension))
    }

    /// Guess from leading bytes, for files whose extension lies.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(PDF_MAGIC) {
            FileType::Pdf
        } else if std::str::from_utf8(bytes).is_ok() {
            FileType::Text
        } else {
            FileType::Unknown
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileType::Pdf => "PDF",
            FileType::Text => "plain text",
            FileType::Markdown => "Markdown",
            FileType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}
