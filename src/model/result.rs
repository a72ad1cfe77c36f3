use super::{KeyEstimate, Note, Scale};
use serde::{Deserialize, Serialize};

/// Tempo estimate in beats per minute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempoEstimate {
    /// BPM, 1 decimal
    pub bpm: f64,
    pub confidence: f64,
}

impl TempoEstimate {
    /// Confidence reported for every tracked tempo
    pub const TRACKED_CONFIDENCE: f64 = 0.85;

    pub fn tracked(bpm: f64) -> Self {
        Self {
            bpm: super::round_to(bpm, 1),
            confidence: Self::TRACKED_CONFIDENCE,
        }
    }

    /// Estimate substituted when tempo detection fails
    pub fn failure_default() -> Self {
        Self {
            bpm: 120.0,
            confidence: 0.5,
        }
    }
}

/// Complete analysis of one audio file, as printed on stdout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub notes: Vec<Note>,
    pub note_count: usize,
    pub key: String,
    pub scale: Scale,
    pub key_confidence: f64,
    pub bpm: f64,
    pub tempo_confidence: f64,
    /// Seconds, 2 decimals
    pub duration: f64,
}

impl AnalysisResult {
    /// Merge the per-analyzer outputs
    pub fn assemble(notes: Vec<Note>, key: KeyEstimate, tempo: TempoEstimate, duration: f64) -> Self {
        Self {
            note_count: notes.len(),
            notes,
            key: key.key,
            scale: key.scale,
            key_confidence: key.confidence,
            bpm: tempo.bpm,
            tempo_confidence: tempo.confidence,
            duration,
        }
    }
}

/// Top-level `{success, analysis?, error?}` wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEnvelope {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisEnvelope {
    pub fn success(analysis: AnalysisResult) -> Self {
        Self {
            success: true,
            analysis: Some(analysis),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            analysis: None,
            error: Some(error.into()),
        }
    }
}
