// Core meeting-notes functionality:
// - Gemini API client and wire types
// - Meeting analysis and task result data structures
// - Extraction strategies (dummy and live) for both flows
// - Input validation and response normalization
// - Configuration loading
// - Shared error types

// Export client module - API client for Gemini
pub mod client;
pub use client::*;

// Export types module - Gemini request/response data structures
pub mod types;
pub use types::*;

// Export analysis module - meeting analysis data model
pub mod analysis;
pub use analysis::*;

// Export config module - Configuration loading
pub mod config;
pub use config::*;

// Export errors module - Shared error types
pub mod errors;
pub use errors::*;

pub mod analyzer;
pub mod data_uri;
pub mod normalizer;
pub mod schema;
pub mod summarizer;
pub mod validation;

pub use analyzer::{
    analyzer_from_config, demo_analysis, DummyAnalyzer, LiveAnalyzer, NotesAnalyzer,
    NotesAnalyzerRef,
};
pub use normalizer::normalize_task_result;
pub use summarizer::{
    summarizer_from_config, DummySummarizer, LiveSummarizer, TaskSummarizer, TaskSummarizerRef,
};
pub use validation::{validate_analysis_input, validate_input, ValidationError};

#[cfg(test)]
pub(crate) mod testing;
