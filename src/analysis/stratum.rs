//! Audio backend powered by symphonia + stratum-dsp
//!
//! `load` decodes with symphonia, `beat_track` runs stratum-dsp's tempo
//! and beat grid analysis on the decoded samples.

use super::decode::decode_to_mono;
use super::tempo::TempoValue;
use super::traits::{AudioBackend, AudioBuffer, BeatTrack};
use crate::error::AnalyzerError;
use anyhow::Result;
use std::path::Path;
use stratum_dsp::{analyze_audio, AnalysisConfig};

/// Audio backend using stratum-dsp for beat tracking
#[derive(Debug, Clone, Default)]
pub struct StratumBackend {
    /// BPM search range handed to stratum-dsp (None = library default)
    bpm_range: Option<(f32, f32)>,
}

impl StratumBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the tempo search range
    pub fn with_bpm_range(mut self, min: f32, max: f32) -> Self {
        self.bpm_range = Some((min, max));
        self
    }
}

impl AudioBackend for StratumBackend {
    fn load(&self, audio_path: &Path) -> Result<AudioBuffer> {
        decode_to_mono(audio_path)
    }

    fn beat_track(&self, audio: &AudioBuffer) -> Result<BeatTrack> {
        // stratum-dsp needs at least a second of material
        if audio.sample_rate == 0 || audio.samples.len() < audio.sample_rate as usize {
            return Err(AnalyzerError::AudioTooShort {
                samples: audio.samples.len(),
                sample_rate: audio.sample_rate,
            }
            .into());
        }

        let mut config = AnalysisConfig::default();
        if let Some((min, max)) = self.bpm_range {
            config.min_bpm = min;
            config.max_bpm = max;
        }

        let result = analyze_audio(&audio.samples, audio.sample_rate, config)
            .map_err(|e| AnalyzerError::BeatTracking(e.to_string()))?;

        log::debug!(
            "stratum-dsp tempo: {:.2} BPM (confidence {:.2}), {} beats",
            result.bpm,
            result.bpm_confidence,
            result.beat_grid.beats.len()
        );

        Ok(BeatTrack {
            tempo: TempoValue::Scalar(result.bpm as f64),
            beats: result.beat_grid.beats,
        })
    }
}
