//! Typed failures raised at the analyzer boundaries

/// Errors produced by the analyzers and their collaborators
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("No audio file provided")]
    MissingInput,

    #[error("Audio too short for analysis: {samples} samples at {sample_rate}Hz")]
    AudioTooShort { samples: usize, sample_rate: u32 },

    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(u32),

    #[error("Beat tracking failed: {0}")]
    BeatTracking(String),

    #[error("Unsupported tempo shape: {0}")]
    TempoShape(String),

    #[error("Invalid tempo value: {0}")]
    InvalidTempo(f64),

    #[error("Pitch-class histogram is empty")]
    EmptyHistogram,
}
