//! Monophonic note transcription using the McLeod pitch method
//!
//! The decoded signal is cut into overlapping frames. Each frame gets a pitch
//! estimate from `pitch-detection`'s McLeod detector, which is snapped to the
//! nearest MIDI note. Runs of frames on the same note become note events.

use super::decode::decode_to_mono;
use super::traits::{NoteEvent, NoteTranscriber};
use anyhow::Result;
use pitch_detection::detector::mcleod::McLeodDetector;
use pitch_detection::detector::PitchDetector;
use std::path::Path;

/// Lowest transcribed note (A0)
const MIDI_MIN: i32 = 21;
/// Highest transcribed note (C8)
const MIDI_MAX: i32 = 108;

/// Tuning knobs for [`McLeodTranscriber`]
#[derive(Debug, Clone)]
pub struct TranscriptionConfig {
    /// Analysis window in samples
    pub window_size: usize,

    /// Step between frames in samples
    pub hop_size: usize,

    /// Minimum frame power (sum of squares) for a pitch to be reported
    pub power_threshold: f64,

    /// Minimum McLeod clarity (0.0-1.0) for a pitch to be reported
    pub clarity_threshold: f64,

    /// Shortest note kept, in milliseconds
    pub min_note_ms: f64,

    /// Unvoiced frames that may be bridged inside a single note
    pub max_gap_frames: usize,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            window_size: 2048,
            hop_size: 512,
            power_threshold: 1.0,
            clarity_threshold: 0.7,
            min_note_ms: 127.7,
            max_gap_frames: 2,
        }
    }
}

/// Per-frame detector output
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frame {
    midi: Option<i32>,
    rms: f64,
}

/// A note being assembled from frames
#[derive(Debug)]
struct Segment {
    pitch: i32,
    first: usize,
    last: usize,
    peak_rms: f64,
}

/// Note transcriber backed by the McLeod pitch detector
#[derive(Debug, Clone, Default)]
pub struct McLeodTranscriber {
    config: TranscriptionConfig,
}

impl McLeodTranscriber {
    pub fn new(config: TranscriptionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranscriptionConfig {
        &self.config
    }

    /// Transcribe decoded mono samples
    pub fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Vec<NoteEvent> {
        let window = self.config.window_size;
        let hop = self.config.hop_size.max(1);

        if sample_rate == 0 || window == 0 || samples.len() < window {
            log::debug!("Not enough audio for a single {}-sample frame", window);
            return Vec::new();
        }

        let mut detector = McLeodDetector::new(window, window / 2);
        let mut signal = vec![0.0f64; window];
        let mut frames = Vec::with_capacity((samples.len() - window) / hop + 1);

        for start in (0..=samples.len() - window).step_by(hop) {
            for (dst, &src) in signal.iter_mut().zip(&samples[start..start + window]) {
                *dst = src as f64;
            }

            let midi = detector
                .get_pitch(
                    &signal,
                    sample_rate as usize,
                    self.config.power_threshold,
                    self.config.clarity_threshold,
                )
                .and_then(|pitch| frequency_to_midi(pitch.frequency));

            frames.push(Frame {
                midi,
                rms: frame_rms(&signal),
            });
        }

        let frame_secs = hop as f64 / sample_rate as f64;
        let notes = segment_frames(
            &frames,
            frame_secs,
            self.config.max_gap_frames,
            self.config.min_note_ms / 1000.0,
        );

        log::debug!(
            "Transcribed {} frames into {} notes",
            frames.len(),
            notes.len()
        );
        notes
    }
}

impl NoteTranscriber for McLeodTranscriber {
    fn predict(&self, audio_path: &Path) -> Result<Vec<NoteEvent>> {
        let audio = decode_to_mono(audio_path)?;
        Ok(self.transcribe(&audio.samples, audio.sample_rate))
    }
}

/// Nearest MIDI note for a frequency, if it is in the piano range
fn frequency_to_midi(frequency: f64) -> Option<i32> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return None;
    }
    let midi = (69.0 + 12.0 * (frequency / 440.0).log2()).round() as i32;
    (MIDI_MIN..=MIDI_MAX).contains(&midi).then_some(midi)
}

fn frame_rms(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    (signal.iter().map(|s| s * s).sum::<f64>() / signal.len() as f64).sqrt()
}

/// Group consecutive frames on the same MIDI note into note events
///
/// Amplitude is the note's loudest frame relative to the loudest frame overall.
fn segment_frames(
    frames: &[Frame],
    frame_secs: f64,
    max_gap: usize,
    min_note_secs: f64,
) -> Vec<NoteEvent> {
    let loudest = frames.iter().map(|f| f.rms).fold(0.0f64, f64::max);
    let mut notes = Vec::new();
    let mut current: Option<Segment> = None;

    let finish = |seg: Segment, notes: &mut Vec<NoteEvent>| {
        let start_s = seg.first as f64 * frame_secs;
        let end_s = (seg.last + 1) as f64 * frame_secs;
        if end_s - start_s < min_note_secs {
            return;
        }
        let amplitude = if loudest > 0.0 {
            (seg.peak_rms / loudest).clamp(0.0, 1.0)
        } else {
            0.0
        };
        notes.push(NoteEvent {
            start_s,
            end_s,
            pitch: seg.pitch,
            amplitude,
        });
    };

    for (i, frame) in frames.iter().enumerate() {
        if let Some(seg) = current.as_mut() {
            if frame.midi == Some(seg.pitch) && i - seg.last <= max_gap + 1 {
                seg.last = i;
                seg.peak_rms = seg.peak_rms.max(frame.rms);
                continue;
            }
            if frame.midi.is_none() && i - seg.last <= max_gap {
                continue;
            }
        }

        if let Some(seg) = current.take() {
            finish(seg, &mut notes);
        }
        if let Some(pitch) = frame.midi {
            current = Some(Segment {
                pitch,
                first: i,
                last: i,
                peak_rms: frame.rms,
            });
        }
    }

    if let Some(seg) = current.take() {
        finish(seg, &mut notes);
    }

    notes
}
