//! ATS scorer library: deterministic resume scoring against applicant tracking systems

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{AtsScorerError, Result};
pub use processing::{AnalysisEngine, AnalysisRequest, AnalysisResult};
