//! Duration extractor

use super::traits::{AudioBackend, Estimate};
use crate::model::round_to;
use anyhow::Result;
use std::path::Path;

/// Duration of an audio file in seconds, 2 decimals
///
/// Falls back to 0.0 when the file cannot be loaded.
pub fn extract_duration<B: AudioBackend + ?Sized>(backend: &B, audio_path: &Path) -> Estimate<f64> {
    match measure(backend, audio_path) {
        Ok(duration) => Estimate::Detected(duration),
        Err(e) => {
            log::error!("❌ Duration error: {:#}", e);
            Estimate::fallback(0.0, format!("{:#}", e))
        }
    }
}

fn measure<B: AudioBackend + ?Sized>(backend: &B, audio_path: &Path) -> Result<f64> {
    let audio = backend.load(audio_path)?;
    let seconds = backend.get_duration(&audio)?;
    Ok(round_to(seconds.max(0.0), 2))
}
