use anyhow::{Context, Result};
use clap::Parser;
use note_analyzer::analysis::TranscriptionConfig;
use note_analyzer::model::AnalysisEnvelope;
use note_analyzer::{output, AnalysisConfig, AnalysisPipeline, AnalyzerError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "note-analyzer")]
#[command(about = "Detect notes, key, tempo and duration of an audio file", long_about = None)]
struct Args {
    /// Audio file to analyze
    audio_file: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Print the JSON result on a single line
    #[arg(long)]
    compact: bool,

    /// Minimum BPM; tempos below are doubled (requires --max-bpm)
    #[arg(long, requires = "max_bpm")]
    min_bpm: Option<f32>,

    /// Maximum BPM; tempos above are halved (requires --min-bpm)
    #[arg(long, requires = "min_bpm")]
    max_bpm: Option<f32>,

    /// Minimum pitch clarity (0.0-1.0) for a frame to count as voiced
    #[arg(long, default_value = "0.7")]
    clarity_threshold: f64,

    /// Minimum frame power for pitch detection
    #[arg(long, default_value = "1.0")]
    power_threshold: f64,

    /// Shortest note to report, in milliseconds
    #[arg(long, default_value = "127.7")]
    min_note_ms: f64,
}

impl Args {
    fn analysis_config(&self) -> AnalysisConfig {
        let transcription = TranscriptionConfig {
            clarity_threshold: self.clarity_threshold,
            power_threshold: self.power_threshold,
            min_note_ms: self.min_note_ms,
            ..TranscriptionConfig::default()
        };

        let mut config = AnalysisConfig::new().with_transcription(transcription);
        if let (Some(min), Some(max)) = (self.min_bpm, self.max_bpm) {
            config = config.with_bpm_range(min, max);
        }
        if self.compact {
            config = config.compact();
        }
        config
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the JSON result
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let Some(audio_file) = args.audio_file.as_deref() else {
        print_failure(&AnalyzerError::MissingInput.to_string());
        return ExitCode::FAILURE;
    };

    match run(&args, audio_file) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("❌ Analysis failed: {:#}", e);
            print_failure(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, audio_file: &str) -> Result<()> {
    let audio_path = PathBuf::from(shellexpand::tilde(audio_file).as_ref());
    let config = args.analysis_config();
    let pretty = config.pretty;

    let pipeline = AnalysisPipeline::from_config(config);
    let envelope = pipeline.analyze(&audio_path).into_envelope();

    let json = output::render(&envelope, pretty)?;
    writeln!(std::io::stdout(), "{}", json).context("Failed to write analysis result")?;
    Ok(())
}

fn print_failure(message: &str) {
    match output::render_compact(&AnalysisEnvelope::failure(message)) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not render error result: {:#}", e),
    }
}
