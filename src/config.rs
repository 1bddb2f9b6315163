//! Configuration management for the ATS scorer

use crate::error::{AtsScorerError, Result};
use crate::processing::industry::DEFAULT_DETECTION_THRESHOLD;
use crate::processing::lexicon::Industry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub engine: EngineConfig,
    pub output: OutputConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Industry used when detection finds too little signal.
    pub default_industry: Industry,
    /// The winning industry needs strictly more term hits than this.
    pub detection_threshold: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_seconds: u64,
    pub capacity: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!(
                "Invalid output format: {}. Supported formats: console, json, markdown",
                s
            )),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig {
                default_industry: Industry::Technology,
                detection_threshold: DEFAULT_DETECTION_THRESHOLD,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
            cache: CacheConfig {
                enabled: true,
                ttl_seconds: 3600,
                capacity: 128,
            },
        }
    }
}

impl Config {
    /// Load from `path`, writing the defaults there first if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| AtsScorerError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AtsScorerError::Configuration(format!("Failed to serialize config: {}", e)))
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-scorer")
            .join("config.toml")
    }

    /// Update a single value by its dotted key, e.g. `cache.ttl_seconds`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "engine.default_industry" => {
                self.engine.default_industry = value.parse().map_err(AtsScorerError::Configuration)?;
            }
            "engine.detection_threshold" => self.engine.detection_threshold = parse_value(key, value)?,
            "output.format" => {
                self.output.format = value.parse().map_err(AtsScorerError::Configuration)?;
            }
            "output.detailed" => self.output.detailed = parse_value(key, value)?,
            "output.color_output" => self.output.color_output = parse_value(key, value)?,
            "cache.enabled" => self.cache.enabled = parse_value(key, value)?,
            "cache.ttl_seconds" => self.cache.ttl_seconds = parse_value(key, value)?,
            "cache.capacity" => self.cache.capacity = parse_value(key, value)?,
            _ => {
                return Err(AtsScorerError::Configuration(format!(
                    "Unknown config key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        AtsScorerError::Configuration(format!("Invalid value '{}' for {}", value, key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("default_industry = \"technology\""));
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_set_dotted_keys() {
        let mut config = Config::default();
        config.set("engine.default_industry", "nursing").unwrap();
        config.set("cache.ttl_seconds", "60").unwrap();
        config.set("output.format", "md").unwrap();
        config.set("output.color_output", "false").unwrap();

        assert_eq!(config.engine.default_industry, Industry::Healthcare);
        assert_eq!(config.cache.ttl_seconds, 60);
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert!(!config.output.color_output);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("engine.nope", "1"),
            Err(AtsScorerError::Configuration(_))
        ));
        assert!(config.set("cache.capacity", "lots").is_err());
        assert!(config.set("engine.default_industry", "astronomy").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ats-scorer").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let mut changed = config.clone();
        changed.set("cache.enabled", "false").unwrap();
        changed.save_to(&path).unwrap();
        assert!(!Config::load_from(&path).unwrap().cache.enabled);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml("engine = 3").is_err());
    }
}
