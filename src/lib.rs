//! Note Analyzer - offline musical analysis of audio files
//!
//! Detects notes, estimates key and tempo, and measures duration for a
//! single audio file, producing one JSON-serializable result.

pub mod analysis;
pub mod error;
pub mod model;
pub mod output;
pub mod pipeline;

pub use error::AnalyzerError;
pub use pipeline::{AnalysisConfig, AnalysisPipeline, AnalysisReport};
