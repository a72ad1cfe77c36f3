//! Result assembler: runs the analyzers in order and merges their output

use super::config::AnalysisConfig;
use crate::analysis::{
    analyze_pitch, analyze_tempo, estimate_key, extract_duration, AudioBackend, Estimate,
    McLeodTranscriber, NoteTranscriber, StratumBackend,
};
use crate::model::{AnalysisEnvelope, AnalysisResult, KeyEstimate, Note, TempoEstimate};
use std::path::Path;

/// Outputs of every analyzer, with their fallback markers
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub notes: Estimate<Vec<Note>>,
    pub key: Estimate<KeyEstimate>,
    pub tempo: Estimate<TempoEstimate>,
    pub duration: Estimate<f64>,
}

impl AnalysisReport {
    /// Analyzers that fell back to defaults, with the reason
    pub fn fallbacks(&self) -> Vec<(&'static str, &str)> {
        [
            ("pitch", self.notes.fallback_reason()),
            ("key", self.key.fallback_reason()),
            ("tempo", self.tempo.fallback_reason()),
            ("duration", self.duration.fallback_reason()),
        ]
        .into_iter()
        .filter_map(|(name, reason)| reason.map(|r| (name, r)))
        .collect()
    }

    /// Flatten into the printed result
    pub fn into_result(self) -> AnalysisResult {
        AnalysisResult::assemble(
            self.notes.into_value(),
            self.key.into_value(),
            self.tempo.into_value(),
            self.duration.into_value(),
        )
    }

    pub fn into_envelope(self) -> AnalysisEnvelope {
        AnalysisEnvelope::success(self.into_result())
    }
}

/// Main analysis pipeline
pub struct AnalysisPipeline<T: NoteTranscriber, B: AudioBackend> {
    config: AnalysisConfig,
    transcriber: T,
    backend: B,
}

impl AnalysisPipeline<McLeodTranscriber, StratumBackend> {
    /// Pipeline with the McLeod transcriber and the stratum-dsp backend
    pub fn from_config(config: AnalysisConfig) -> Self {
        let transcriber = McLeodTranscriber::new(config.transcription.clone());
        let backend = match config.bpm_range {
            Some((min, max)) => StratumBackend::new().with_bpm_range(min, max),
            None => StratumBackend::new(),
        };
        Self::new(config, transcriber, backend)
    }
}

impl<T: NoteTranscriber, B: AudioBackend> AnalysisPipeline<T, B> {
    pub fn new(config: AnalysisConfig, transcriber: T, backend: B) -> Self {
        Self {
            config,
            transcriber,
            backend,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run pitch, key, tempo and duration analysis on one file
    ///
    /// Always produces a report; failing analyzers contribute their defaults.
    pub fn analyze(&self, audio_path: &Path) -> AnalysisReport {
        log::info!("🎵 Starting analysis of: {}", audio_path.display());

        let notes = analyze_pitch(&self.transcriber, audio_path);
        let key = estimate_key(notes.value());
        let tempo = analyze_tempo(&self.backend, audio_path, self.config.bpm_range);
        let duration = extract_duration(&self.backend, audio_path);

        let report = AnalysisReport {
            notes,
            key,
            tempo,
            duration,
        };

        for (analyzer, reason) in report.fallbacks() {
            log::warn!("{} analysis used its default value: {}", analyzer, reason);
        }

        let key = report.key.value();
        log::info!(
            "Analysis summary: {} notes, key {} {}, {:.1} BPM, {:.2}s",
            report.notes.value().len(),
            key.key,
            key.scale.name(),
            report.tempo.value().bpm,
            report.duration.value()
        );
        log::info!("✅ Analysis complete!");

        report
    }
}
