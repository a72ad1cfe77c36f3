use super::round_to;
use serde::{Deserialize, Serialize};

/// A detected note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// MIDI note number (60 = middle C)
    pub pitch: i32,

    /// Onset in seconds (3 decimals)
    pub start_time: f64,

    /// Offset in seconds (3 decimals)
    pub end_time: f64,

    /// `end_time - start_time` in seconds (3 decimals)
    pub duration: f64,

    /// Note strength as reported by the transcriber, normally 0.0-1.0 (2 decimals)
    pub velocity: f64,
}

impl Note {
    /// Build a note from raw timings, applying the output precision
    pub fn new(pitch: i32, start_s: f64, end_s: f64, velocity: f64) -> Self {
        Self {
            pitch,
            start_time: round_to(start_s, 3),
            end_time: round_to(end_s, 3),
            duration: round_to(end_s - start_s, 3),
            velocity: round_to(velocity, 2),
        }
    }

    /// Pitch class (0 = C ... 11 = B)
    pub fn pitch_class(&self) -> usize {
        self.pitch.rem_euclid(12) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_rounding() {
        let note = Note::new(60, 0.123456, 0.654321, 0.8765);
        assert_eq!(note.start_time, 0.123);
        assert_eq!(note.end_time, 0.654);
        // Duration is rounded from the raw difference, not from the rounded ends
        assert_eq!(note.duration, 0.531);
        assert_eq!(note.velocity, 0.88);
    }

    #[test]
    fn test_velocity_tie_rounds_to_even() {
        let note = Note::new(60, 0.0, 0.0625, 0.125);
        assert_eq!(note.velocity, 0.12);
        assert_eq!(note.duration, 0.062);
    }

    #[test]
    fn test_pitch_class() {
        assert_eq!(Note::new(60, 0.0, 1.0, 1.0).pitch_class(), 0);
        assert_eq!(Note::new(67, 0.0, 1.0, 1.0).pitch_class(), 7);
        assert_eq!(Note::new(71, 0.0, 1.0, 1.0).pitch_class(), 11);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&Note::new(64, 1.0, 1.5, 0.5)).unwrap();
        assert!(json.contains("\"startTime\":1.0"));
        assert!(json.contains("\"endTime\":1.5"));
    }
}
