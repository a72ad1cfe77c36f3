//! Analysis orchestration

pub mod assembler;
pub mod config;

pub use assembler::{AnalysisPipeline, AnalysisReport};
pub use config::AnalysisConfig;
