//! Pitch analyzer: transcription model output -> normalized notes

use super::traits::{Estimate, NoteEvent, NoteTranscriber};
use crate::model::Note;
use std::path::Path;

/// Detect the notes played in an audio file
///
/// Never fails: a transcription error yields an empty note list as a fallback.
pub fn analyze_pitch<T: NoteTranscriber + ?Sized>(
    transcriber: &T,
    audio_path: &Path,
) -> Estimate<Vec<Note>> {
    log::info!("🎵 Analyzing pitch...");

    match transcriber.predict(audio_path) {
        Ok(events) => {
            let notes: Vec<Note> = events.iter().filter_map(note_from_event).collect();
            log::debug!("Detected {} notes", notes.len());
            Estimate::Detected(notes)
        }
        Err(e) => {
            log::error!("❌ Pitch detection error: {:#}", e);
            Estimate::fallback(Vec::new(), format!("{:#}", e))
        }
    }
}

/// Events with non-finite timing or amplitude cannot be written as JSON numbers
fn note_from_event(event: &NoteEvent) -> Option<Note> {
    if ![event.start_s, event.end_s, event.amplitude]
        .iter()
        .all(|v| v.is_finite())
    {
        log::warn!("Skipping note event with non-finite values: {:?}", event);
        return None;
    }
    Some(Note::new(event.pitch, event.start_s, event.end_s, event.amplitude))
}
