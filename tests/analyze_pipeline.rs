use anyhow::Result;
use note_analyzer::analysis::{
    extract_duration, AudioBackend, AudioBuffer, BeatTrack, McLeodTranscriber, NoteEvent,
    NoteTranscriber, StratumBackend, TempoValue,
};
use note_analyzer::model::{AnalysisEnvelope, KeyEstimate, Scale, TempoEstimate};
use note_analyzer::{AnalysisConfig, AnalysisPipeline};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Transcriber returning a fixed list of MIDI pitches, half a second each
struct ScriptedTranscriber(Vec<i32>);

impl NoteTranscriber for ScriptedTranscriber {
    fn predict(&self, _audio_path: &Path) -> Result<Vec<NoteEvent>> {
        Ok(self
            .0
            .iter()
            .enumerate()
            .map(|(i, &pitch)| NoteEvent {
                start_s: i as f64 * 0.5,
                end_s: i as f64 * 0.5 + 0.4567,
                pitch,
                amplitude: 0.777,
            })
            .collect())
    }
}

struct FailingTranscriber;

impl NoteTranscriber for FailingTranscriber {
    fn predict(&self, _audio_path: &Path) -> Result<Vec<NoteEvent>> {
        anyhow::bail!("inference runtime unavailable")
    }
}

/// Backend with canned audio and a canned tempo shape
struct FakeBackend {
    tempo: TempoValue,
    seconds: f64,
}

impl AudioBackend for FakeBackend {
    fn load(&self, _audio_path: &Path) -> Result<AudioBuffer> {
        let sample_rate = 22050;
        let samples = vec![0.0; (self.seconds * sample_rate as f64) as usize];
        Ok(AudioBuffer::new(samples, sample_rate))
    }

    fn beat_track(&self, _audio: &AudioBuffer) -> Result<BeatTrack> {
        Ok(BeatTrack {
            tempo: self.tempo.clone(),
            beats: vec![0.5, 1.0, 1.5],
        })
    }
}

struct UnreadableBackend;

impl AudioBackend for UnreadableBackend {
    fn load(&self, audio_path: &Path) -> Result<AudioBuffer> {
        anyhow::bail!("cannot decode {:?}", audio_path)
    }

    fn beat_track(&self, _audio: &AudioBuffer) -> Result<BeatTrack> {
        unreachable!("load always fails")
    }
}

fn fake_backend(tempo: TempoValue) -> FakeBackend {
    FakeBackend {
        tempo,
        seconds: 4.321,
    }
}

/// Write a 16-bit mono WAV with one sine tone per entry
fn write_tones(dir: &TempDir, name: &str, tones: &[(f64, f64)]) -> PathBuf {
    let path = dir.path().join(name);
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for &(freq, seconds) in tones {
        let n = (44100.0 * seconds) as usize;
        for i in 0..n {
            let t = i as f64 / 44100.0;
            let value = 0.5 * (2.0 * std::f64::consts::PI * freq * t).sin();
            writer.write_sample((value * i16::MAX as f64) as i16).unwrap();
        }
    }
    writer.finalize().unwrap();
    path
}

#[test]
fn test_c_major_triad_end_to_end() {
    let pipeline = AnalysisPipeline::new(
        AnalysisConfig::default(),
        ScriptedTranscriber(vec![60, 64, 67]),
        fake_backend(TempoValue::Scalar(127.96)),
    );

    let report = pipeline.analyze(Path::new("triad.wav"));
    assert!(report.fallbacks().is_empty());

    let result = report.into_result();
    assert_eq!(result.note_count, 3);
    assert_eq!(result.notes[0].end_time, 0.457);
    assert_eq!(result.notes[0].velocity, 0.78);
    assert_eq!(result.key, "C");
    assert_eq!(result.scale, Scale::Major);
    assert_eq!(result.key_confidence, 0.67);
    assert_eq!(result.bpm, 128.0);
    assert_eq!(result.tempo_confidence, 0.85);
    assert_eq!(result.duration, 4.32);
}

#[test]
fn test_tempo_shapes_are_normalized() {
    for tempo in [
        TempoValue::Scalar(99.44),
        TempoValue::Array(vec![99.44]),
        TempoValue::Sequence(vec![99.44, 49.72]),
    ] {
        let pipeline = AnalysisPipeline::new(
            AnalysisConfig::default(),
            ScriptedTranscriber(vec![60]),
            fake_backend(tempo),
        );
        let report = pipeline.analyze(Path::new("song.wav"));
        assert!(!report.tempo.is_fallback());
        assert_eq!(report.tempo.value().bpm, 99.4);
    }
}

#[test]
fn test_bad_tempo_shape_falls_back() {
    let pipeline = AnalysisPipeline::new(
        AnalysisConfig::default(),
        ScriptedTranscriber(vec![60]),
        fake_backend(TempoValue::Array(vec![90.0, 180.0])),
    );
    let report = pipeline.analyze(Path::new("song.wav"));
    assert!(report.tempo.is_fallback());
    assert_eq!(*report.tempo.value(), TempoEstimate::failure_default());
    // The other analyzers are unaffected
    assert!(!report.duration.is_fallback());
}

#[test]
fn test_bpm_range_folds_tempo() {
    let pipeline = AnalysisPipeline::new(
        AnalysisConfig::default().with_bpm_range(70.0, 170.0),
        ScriptedTranscriber(vec![60]),
        fake_backend(TempoValue::Scalar(64.0)),
    );
    let report = pipeline.analyze(Path::new("song.wav"));
    assert_eq!(report.tempo.value().bpm, 128.0);
}

#[test]
fn test_every_failure_is_absorbed() {
    let pipeline = AnalysisPipeline::new(
        AnalysisConfig::default(),
        FailingTranscriber,
        UnreadableBackend,
    );
    let report = pipeline.analyze(Path::new("missing.wav"));

    let failed: Vec<&str> = report.fallbacks().iter().map(|(name, _)| *name).collect();
    assert_eq!(failed, vec!["pitch", "key", "tempo", "duration"]);

    let envelope = report.into_envelope();
    assert!(envelope.success);
    assert!(envelope.error.is_none());

    let result = envelope.analysis.unwrap();
    assert!(result.notes.is_empty());
    assert_eq!(result.note_count, 0);
    assert_eq!(result.key, KeyEstimate::unknown().key);
    assert_eq!(result.key_confidence, 0.0);
    assert_eq!(result.bpm, 120.0);
    assert_eq!(result.tempo_confidence, 0.5);
    assert_eq!(result.duration, 0.0);
}

#[test]
fn test_envelope_json_round_trip() {
    let pipeline = AnalysisPipeline::new(
        AnalysisConfig::default(),
        ScriptedTranscriber(vec![57, 60, 64, 57]),
        fake_backend(TempoValue::Scalar(101.23)),
    );
    let envelope = pipeline.analyze(Path::new("song.wav")).into_envelope();

    let json = note_analyzer::output::render_pretty(&envelope).unwrap();
    let parsed: AnalysisEnvelope = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, envelope);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let analysis = &value["analysis"];
    for field in [
        "notes",
        "noteCount",
        "key",
        "scale",
        "keyConfidence",
        "bpm",
        "tempoConfidence",
        "duration",
    ] {
        assert!(!analysis[field].is_null(), "missing {}", field);
    }
    assert_eq!(analysis["scale"], "minor");
    assert_eq!(analysis["notes"][0]["startTime"], 0.0);
}

#[test]
fn test_transcribes_wav_melody() {
    let dir = TempDir::new().unwrap();
    let path = write_tones(&dir, "melody.wav", &[(261.63, 0.5), (329.63, 0.5), (392.0, 0.5)]);

    let notes = McLeodTranscriber::default().predict(&path).unwrap();
    let pitches: Vec<i32> = notes.iter().map(|n| n.pitch).collect();
    assert_eq!(pitches, vec![60, 64, 67]);
    assert!(notes.windows(2).all(|w| w[0].end_s <= w[1].start_s));
    assert!(notes.iter().all(|n| (0.0..=1.0).contains(&n.amplitude)));
}

#[test]
fn test_wav_duration() {
    let dir = TempDir::new().unwrap();
    let path = write_tones(&dir, "tone.wav", &[(440.0, 1.5)]);

    let duration = extract_duration(&StratumBackend::new(), &path);
    assert!(!duration.is_fallback());
    assert_eq!(*duration.value(), 1.5);
}

#[test]
fn test_real_pipeline_on_wav() {
    let dir = TempDir::new().unwrap();
    let path = write_tones(&dir, "melody.wav", &[(261.63, 0.5), (329.63, 0.5), (392.0, 0.5)]);

    let report = AnalysisPipeline::from_config(AnalysisConfig::default()).analyze(&path);
    let result = report.into_result();

    assert_eq!(result.note_count, 3);
    assert_eq!(result.key, "C");
    assert_eq!(result.scale, Scale::Major);
    assert_eq!(result.key_confidence, 0.67);
    assert_eq!(result.duration, 1.5);
    assert!(result.bpm > 0.0);
}

#[test]
fn test_real_pipeline_on_missing_file() {
    let report = AnalysisPipeline::from_config(AnalysisConfig::default())
        .analyze(Path::new("/nonexistent/file.wav"));
    assert_eq!(report.fallbacks().len(), 4);
    assert_eq!(report.into_result().duration, 0.0);
}
