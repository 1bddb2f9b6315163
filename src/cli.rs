//! CLI interface for the ATS scorer

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ats-scorer")]
#[command(about = "Score resumes for applicant tracking system compatibility")]
#[command(long_about = "Analyze a resume's keywords, formatting and completeness the way applicant tracking systems read it, optionally against a job description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume, optionally against one or more job descriptions
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to a job description file (TXT, MD); repeat for several
        #[arg(short, long)]
        job: Vec<PathBuf>,

        /// Industry to score against instead of detecting it
        #[arg(short, long)]
        industry: Option<String>,

        /// JSON file with the candidate profile (industry, seniority, top_skills)
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown (defaults to the configured format)
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to a file, or into a directory under a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// List supported industries and their dictionaries
    Industries,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "cache.ttl_seconds")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_with_jobs() {
        let cli = Cli::try_parse_from([
            "ats-scorer", "analyze", "-r", "cv.pdf", "-j", "a.txt", "-j", "b.md", "--industry", "sales",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { resume, job, industry, output, .. } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(job.len(), 2);
                assert_eq!(industry.as_deref(), Some("sales"));
                assert!(output.is_none());
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_parse_config_set() {
        let cli = Cli::try_parse_from(["ats-scorer", "-v", "config", "set", "output.format", "json"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Config { action: Some(ConfigAction::Set { .. }) }
        ));
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["pdf"]).is_err());
    }
}
