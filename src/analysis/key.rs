//! Key estimator
//!
//! Picks the most frequent pitch class as the tonic and decides the mode by
//! comparing how often the major and minor thirds above it occur.

use super::traits::Estimate;
use crate::error::AnalyzerError;
use crate::model::{round_to, KeyEstimate, Note, Scale, KEY_NAMES};

/// Upper bound on key confidence
const MAX_CONFIDENCE: f64 = 0.95;

/// Pitch-class counts, remembering the order classes were first seen
#[derive(Debug, Default)]
struct PitchClassHistogram {
    counts: [usize; 12],
    first_seen: Vec<usize>,
    total: usize,
}

impl PitchClassHistogram {
    fn from_notes(notes: &[Note]) -> Self {
        let mut histogram = Self::default();
        for note in notes {
            let class = note.pitch_class();
            if histogram.counts[class] == 0 {
                histogram.first_seen.push(class);
            }
            histogram.counts[class] += 1;
            histogram.total += 1;
        }
        histogram
    }

    fn count(&self, class: usize) -> usize {
        self.counts[class % 12]
    }

    /// Most frequent class; ties go to the class seen first
    fn tonic(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for &class in &self.first_seen {
            if best.map_or(true, |b| self.counts[class] > self.counts[b]) {
                best = Some(class);
            }
        }
        best
    }
}

/// Estimate key and mode from detected notes
///
/// Any integer pitch is accepted; only its class (`pitch mod 12`) matters.
/// An empty note list gives `{Unknown, major, 0}`; an internal failure gives
/// `{C, major, 0.5}`. Both are reported as fallbacks.
pub fn estimate_key(notes: &[Note]) -> Estimate<KeyEstimate> {
    log::info!("🎹 Detecting key...");

    if notes.is_empty() {
        return Estimate::fallback(KeyEstimate::unknown(), "no notes to analyze");
    }

    match key_from_notes(notes) {
        Ok(key) => Estimate::Detected(key),
        Err(e) => {
            log::error!("❌ Key detection error: {}", e);
            Estimate::fallback(KeyEstimate::failure_default(), e)
        }
    }
}

fn key_from_notes(notes: &[Note]) -> Result<KeyEstimate, AnalyzerError> {
    let histogram = PitchClassHistogram::from_notes(notes);
    let tonic = histogram.tonic().ok_or(AnalyzerError::EmptyHistogram)?;

    let major_third = histogram.count(tonic + 4);
    let minor_third = histogram.count(tonic + 3);
    let scale = if major_third >= minor_third {
        Scale::Major
    } else {
        Scale::Minor
    };

    let share = histogram.count(tonic) as f64 / histogram.total as f64;
    let confidence = round_to((share * 2.0).min(MAX_CONFIDENCE), 2);

    log::debug!(
        "Pitch-class counts {:?}, tonic {} ({} of {})",
        histogram.counts,
        KEY_NAMES[tonic],
        histogram.count(tonic),
        histogram.total
    );

    Ok(KeyEstimate {
        key: KEY_NAMES[tonic].to_string(),
        scale,
        confidence,
    })
}
