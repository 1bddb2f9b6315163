//! Resume scoring pipeline

pub mod analyzer;
pub mod ats_checker;
pub mod cache;
pub mod completeness;
pub mod document;
pub mod industry;
pub mod jd_matcher;
pub mod keyword_extractor;
pub mod lexicon;
pub mod profile;
pub mod recommendations;
pub mod scoring;
pub mod similarity;
pub mod term_matcher;
pub mod text_processor;

pub use analyzer::{AnalysisEngine, AnalysisRequest, AnalysisResult};
