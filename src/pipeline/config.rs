//! Analysis configuration

use crate::analysis::TranscriptionConfig;

/// Configuration for one analysis run
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Note transcription settings
    pub transcription: TranscriptionConfig,

    /// Tempo range (min, max) BPM; when set, the tempo is folded into it
    pub bpm_range: Option<(f32, f32)>,

    /// Pretty-print the JSON result (2-space indent)
    pub pretty: bool,
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self {
            transcription: TranscriptionConfig::default(),
            bpm_range: None,
            pretty: true,
        }
    }

    /// Set the tempo range
    pub fn with_bpm_range(mut self, min: f32, max: f32) -> Self {
        self.bpm_range = Some((min, max));
        self
    }

    /// Set transcription settings
    pub fn with_transcription(mut self, transcription: TranscriptionConfig) -> Self {
        self.transcription = transcription;
        self
    }

    /// Emit single-line JSON
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}
