//! Data model for a single analysis run
//!
//! These types are what the analyzers produce and what ends up in the JSON
//! printed on stdout. Field names on the wire are camelCase.

mod key;
mod note;
mod result;

pub use key::{KeyEstimate, Scale, KEY_NAMES};
pub use note::Note;
pub use result::{AnalysisEnvelope, AnalysisResult, TempoEstimate};

/// Round to a fixed number of decimal places, ties to even
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.666_666, 2), 0.67);
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(119.96, 1), 120.0);
        assert_eq!(round_to(0.0, 2), 0.0);
    }

    #[test]
    fn test_round_to_ties_to_even() {
        assert_eq!(round_to(0.625, 2), 0.62);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(2.5, 0), 2.0);
    }
}
