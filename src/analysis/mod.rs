//! Audio analysis layer
//!
//! The transcription model and the audio/beat-tracking library sit behind
//! the [`NoteTranscriber`] and [`AudioBackend`] traits. The analyzers on top
//! of them never fail; each returns an [`Estimate`] that is either a real
//! value or a documented default.
//!
//! Decoding is done with symphonia, beat tracking with stratum-dsp and note
//! transcription with the McLeod detector from `pitch-detection`.

mod decode;
mod duration;
mod key;
mod pitch;
mod stratum;
mod tempo;
mod traits;
mod transcribe;

pub use decode::decode_to_mono;
pub use duration::extract_duration;
pub use key::estimate_key;
pub use pitch::analyze_pitch;
pub use stratum::StratumBackend;
pub use tempo::{analyze_tempo, fold_into_range, TempoValue};
pub use traits::{AudioBackend, AudioBuffer, BeatTrack, Estimate, NoteEvent, NoteTranscriber};
pub use transcribe::{McLeodTranscriber, TranscriptionConfig};
