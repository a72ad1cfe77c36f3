//! Collaborator traits and the tagged analyzer result

use super::tempo::TempoValue;
use crate::error::AnalyzerError;
use anyhow::Result;
use std::fmt;
use std::path::Path;

/// A note event as emitted by a transcription model
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEvent {
    pub start_s: f64,
    pub end_s: f64,
    /// MIDI note number
    pub pitch: i32,
    /// Relative strength, 0.0-1.0
    pub amplitude: f64,
}

/// Note transcription model - allows swapping the detector behind the pitch analyzer
pub trait NoteTranscriber {
    /// Transcribe an audio file into time-ordered note events
    fn predict(&self, audio_path: &Path) -> Result<Vec<NoteEvent>>;
}

/// Decoded mono audio
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Length in seconds
    pub fn duration_secs(&self) -> std::result::Result<f64, AnalyzerError> {
        if self.sample_rate == 0 {
            return Err(AnalyzerError::InvalidSampleRate(self.sample_rate));
        }
        Ok(self.samples.len() as f64 / self.sample_rate as f64)
    }
}

/// Output of a beat tracker
#[derive(Debug, Clone)]
pub struct BeatTrack {
    /// Tempo in whatever shape the tracker reports it
    pub tempo: TempoValue,
    /// Beat positions in seconds
    pub beats: Vec<f32>,
}

/// Audio loading and beat tracking backend
pub trait AudioBackend {
    /// Decode a file to mono samples
    fn load(&self, audio_path: &Path) -> Result<AudioBuffer>;

    /// Track beats and estimate tempo
    fn beat_track(&self, audio: &AudioBuffer) -> Result<BeatTrack>;

    /// Duration of the decoded audio in seconds
    fn get_duration(&self, audio: &AudioBuffer) -> Result<f64> {
        Ok(audio.duration_secs()?)
    }
}

/// Result of one analyzer: either a real estimate or a documented default
/// substituted after a failure
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate<T> {
    Detected(T),
    Fallback { value: T, reason: String },
}

impl<T> Estimate<T> {
    pub fn fallback(value: T, reason: impl fmt::Display) -> Self {
        Estimate::Fallback {
            value,
            reason: reason.to_string(),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Estimate::Detected(value) | Estimate::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Estimate::Detected(value) | Estimate::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Estimate::Fallback { .. })
    }

    /// Why the default was used, if it was
    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            Estimate::Detected(_) => None,
            Estimate::Fallback { reason, .. } => Some(reason.as_str()),
        }
    }
}
