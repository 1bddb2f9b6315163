//! Resume and job description input
//! Detects file types and extracts plain text for the engine

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use manager::InputManager;
