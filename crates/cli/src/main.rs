use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::thread;

use clap::Parser;

use bodysense_core::output::domain::snapshot::BodyLanguageSnapshot;
use bodysense_core::output::domain::snapshot_sink::{SinkError, SnapshotSink};
use bodysense_core::output::infrastructure::channel_sink::ChannelSink;
use bodysense_core::output::infrastructure::json_lines_sink::JsonLinesSink;
use bodysense_core::pipeline::body_language_pipeline::BodyLanguagePipeline;
use bodysense_core::pipeline::pipeline_config::PipelineConfig;
use bodysense_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use bodysense_core::pipeline::replay_recording_use_case::ReplayRecordingUseCase;
use bodysense_core::pipeline::session_summarizer::{SessionSummarizer, SessionSummary};
use bodysense_core::source::domain::landmark_source::LandmarkSource;
use bodysense_core::source::infrastructure::json_lines_source::JsonLinesSource;

const CHANNEL_CAPACITY: usize = 64;

/// Emotion, posture and fatigue snapshots from facial landmark recordings.
#[derive(Parser, Debug)]
#[command(name = "bodysense")]
struct Cli {
    /// JSON-lines landmark recording ("-" or omitted reads stdin).
    input: Option<PathBuf>,

    /// Write snapshots here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum milliseconds between snapshots.
    #[arg(long)]
    cadence_ms: Option<u64>,

    /// Emotion history capacity.
    #[arg(long)]
    history_size: Option<usize>,

    /// Entries considered by each stabilization vote.
    #[arg(long)]
    stability_window: Option<usize>,

    /// Share of face frames the dominant emotion must hold (0.0-1.0).
    #[arg(long)]
    min_consistency: Option<f64>,

    /// Report a session summary for every summary window.
    #[arg(long)]
    summary: bool,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = effective_config(&cli)?;
    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let (tx, rx) = crossbeam_channel::bounded::<BodyLanguageSnapshot>(CHANNEL_CAPACITY);
    let writer = open_writer(cli.output.as_deref())?;
    let writer_handle = thread::spawn(move || -> Result<usize, SinkError> {
        let mut sink = JsonLinesSink::new(writer);
        for snapshot in rx {
            sink.send(&snapshot)?;
        }
        Ok(sink.written())
    });

    let pipeline = BodyLanguagePipeline::new(
        &config,
        Box::new(ChannelSink::new(tx)),
        Box::new(StdoutPipelineLogger::default()),
    );
    let mut replay = ReplayRecordingUseCase::new(open_source(cli.input.as_deref()), pipeline);
    if cli.summary {
        replay = replay.with_summaries(
            SessionSummarizer::new(config.summary_window_ms, config.summary_min_points),
            Box::new(print_summary),
        );
    }

    let report = replay.execute()?;
    // Dropping the use case closes the channel so the writer can finish.
    drop(replay);

    let written = writer_handle
        .join()
        .map_err(|_| "Snapshot writer thread panicked")??;
    log::info!(
        "Replayed {} frames ({} with a face), wrote {written} snapshots",
        report.frames,
        report.face_frames
    );
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(input) = cli.input.as_deref().filter(|p| !is_stdin(p)) {
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()).into());
        }
    }
    if let Some(config) = &cli.config {
        if !config.exists() {
            return Err(format!("Config file not found: {}", config.display()).into());
        }
    }
    Ok(())
}

/// File or default config, with command-line flags taking precedence.
fn effective_config(cli: &Cli) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    let mut config = PipelineConfig::resolve(cli.config.as_deref())?;
    apply_overrides(&mut config, cli);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut PipelineConfig, cli: &Cli) {
    if let Some(cadence_ms) = cli.cadence_ms {
        config.cadence_ms = cadence_ms;
    }
    if let Some(history_size) = cli.history_size {
        config.history_size = history_size;
    }
    if let Some(window) = cli.stability_window {
        config.stability_window = window;
    }
    if let Some(min_consistency) = cli.min_consistency {
        config.min_consistency = min_consistency;
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn open_source(input: Option<&Path>) -> Box<dyn LandmarkSource> {
    match input.filter(|p| !is_stdin(p)) {
        Some(path) => Box::new(JsonLinesSource::from_path(path)),
        None => Box::new(JsonLinesSource::from_reader(Box::new(BufReader::new(
            io::stdin(),
        )))),
    }
}

fn open_writer(output: Option<&Path>) -> Result<Box<dyn Write + Send>, io::Error> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    })
}

fn print_summary(summary: &SessionSummary) {
    match serde_json::to_string(summary) {
        Ok(json) => eprintln!("{json}"),
        Err(e) => log::warn!("Failed to serialize session summary: {e}"),
    }
}
