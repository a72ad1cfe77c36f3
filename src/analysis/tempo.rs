//! Tempo analyzer
//!
//! Beat trackers report tempo in several shapes. [`TempoValue`] names each
//! shape explicitly and [`TempoValue::to_bpm`] is the only place that turns
//! one into a plain number.

use super::traits::{AudioBackend, Estimate};
use crate::error::AnalyzerError;
use crate::model::TempoEstimate;
use anyhow::Result;
use std::path::Path;

/// Tempo as reported by a beat tracker
#[derive(Debug, Clone, PartialEq)]
pub enum TempoValue {
    /// Plain number
    Scalar(f64),
    /// Array-like value that must hold exactly one element
    Array(Vec<f64>),
    /// Sequence of estimates; the first is used
    Sequence(Vec<f64>),
}

impl TempoValue {
    /// Coerce to a plain BPM value
    pub fn to_bpm(&self) -> std::result::Result<f64, AnalyzerError> {
        let bpm = match self {
            TempoValue::Scalar(bpm) => *bpm,
            TempoValue::Array(values) => match values.as_slice() {
                [bpm] => *bpm,
                _ => {
                    return Err(AnalyzerError::TempoShape(format!(
                        "array of {} elements",
                        values.len()
                    )))
                }
            },
            TempoValue::Sequence(values) => *values
                .first()
                .ok_or_else(|| AnalyzerError::TempoShape("empty sequence".to_string()))?,
        };

        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(AnalyzerError::InvalidTempo(bpm));
        }
        Ok(bpm)
    }
}

/// Detect the tempo of an audio file
///
/// Never fails: on any error the default `{120.0, 0.5}` is returned as a fallback.
pub fn analyze_tempo<B: AudioBackend + ?Sized>(
    backend: &B,
    audio_path: &Path,
    bpm_range: Option<(f32, f32)>,
) -> Estimate<TempoEstimate> {
    log::info!("⏱️ Detecting tempo...");

    match track_tempo(backend, audio_path, bpm_range) {
        Ok(bpm) => Estimate::Detected(TempoEstimate::tracked(bpm)),
        Err(e) => {
            log::error!("❌ Tempo detection error: {:#}", e);
            Estimate::fallback(TempoEstimate::failure_default(), format!("{:#}", e))
        }
    }
}

fn track_tempo<B: AudioBackend + ?Sized>(
    backend: &B,
    audio_path: &Path,
    bpm_range: Option<(f32, f32)>,
) -> Result<f64> {
    let audio = backend.load(audio_path)?;
    let track = backend.beat_track(&audio)?;
    log::debug!("Beat tracker found {} beats", track.beats.len());

    let bpm = track.tempo.to_bpm()?;
    Ok(match bpm_range {
        Some((min, max)) => fold_into_range(bpm, min as f64, max as f64),
        None => bpm,
    })
}

/// Double or halve a tempo until it sits inside `[min, max]`, where possible
pub fn fold_into_range(mut bpm: f64, min: f64, max: f64) -> f64 {
    if min <= 0.0 || max <= 0.0 || bpm <= 0.0 {
        return bpm;
    }
    while bpm < min && bpm * 2.0 <= max {
        bpm *= 2.0;
        log::debug!("BPM doubled to {:.1} (was below minimum {})", bpm, min);
    }
    while bpm > max && bpm / 2.0 >= min {
        bpm /= 2.0;
        log::debug!("BPM halved to {:.1} (was above maximum {})", bpm, max);
    }
    bpm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_tempo() {
        assert_eq!(TempoValue::Scalar(123.4).to_bpm().unwrap(), 123.4);
    }

    #[test]
    fn test_single_element_array() {
        assert_eq!(TempoValue::Array(vec![99.5]).to_bpm().unwrap(), 99.5);
    }

    #[test]
    fn test_multi_element_array_is_rejected() {
        assert!(matches!(
            TempoValue::Array(vec![99.5, 120.0]).to_bpm(),
            Err(AnalyzerError::TempoShape(_))
        ));
        assert!(TempoValue::Array(Vec::new()).to_bpm().is_err());
    }

    #[test]
    fn test_sequence_uses_first() {
        assert_eq!(
            TempoValue::Sequence(vec![140.0, 70.0]).to_bpm().unwrap(),
            140.0
        );
        assert!(TempoValue::Sequence(Vec::new()).to_bpm().is_err());
    }

    #[test]
    fn test_non_finite_tempo_is_rejected() {
        assert!(matches!(
            TempoValue::Scalar(f64::NAN).to_bpm(),
            Err(AnalyzerError::InvalidTempo(_))
        ));
        assert!(TempoValue::Scalar(0.0).to_bpm().is_err());
    }

    #[test]
    fn test_fold_into_range() {
        assert_eq!(fold_into_range(60.0, 70.0, 170.0), 120.0);
        assert_eq!(fold_into_range(280.0, 70.0, 170.0), 140.0);
        assert_eq!(fold_into_range(128.0, 70.0, 170.0), 128.0);
        // Cannot be folded without leaving the range
        assert_eq!(fold_into_range(100.0, 110.0, 150.0), 100.0);
    }
}
