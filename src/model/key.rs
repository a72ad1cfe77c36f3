use serde::{Deserialize, Serialize};

/// Pitch-class names, indexed by `pitch % 12`
pub const KEY_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Major or minor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    Major,
    Minor,
}

impl Scale {
    pub fn name(&self) -> &'static str {
        match self {
            Scale::Major => "major",
            Scale::Minor => "minor",
        }
    }
}

/// Estimated key of a note collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEstimate {
    /// Tonic name from [`KEY_NAMES`], or "Unknown"
    pub key: String,

    pub scale: Scale,

    /// 0.0-0.95
    pub confidence: f64,
}

impl KeyEstimate {
    /// Estimate for an empty note list
    pub fn unknown() -> Self {
        Self {
            key: "Unknown".to_string(),
            scale: Scale::Major,
            confidence: 0.0,
        }
    }

    /// Estimate substituted when key detection itself fails
    pub fn failure_default() -> Self {
        Self {
            key: "C".to_string(),
            scale: Scale::Major,
            confidence: 0.5,
        }
    }
}
