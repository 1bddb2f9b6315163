//! Input manager: routes files to the right extractor and caches results

use crate::error::{AtsScorerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::io::AsyncReadExt;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let key = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&key) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(AtsScorerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path)?;
        let text = match file_type {
            FileType::Pdf => {
                if sniff_file(path).await? != FileType::Pdf {
                    return Err(AtsScorerError::PdfExtraction(format!(
                        "{} does not start with a PDF header",
                        path.display()
                    )));
                }
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(AtsScorerError::UnsupportedFormat(format!(
                    "Unsupported file type for {} (supported: {})",
                    path.display(),
                    FileType::SUPPORTED_EXTENSIONS.join(", ")
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(key, text.clone());
        }

        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

/// Detect a file's type from its first bytes.
async fn sniff_file(path: &Path) -> Result<FileType> {
    let mut header = [0u8; 8];
    let mut file = tokio::fs::File::open(path).await?;
    let read = file.read(&mut header).await?;
    Ok(FileType::sniff(&header[..read]))
}
