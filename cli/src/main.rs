mod replay;
mod script;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use gesture_canvas::{CanvasEngine, CanvasOptions, ConfigError, ManualScheduler};
use tracing_subscriber::EnvFilter;

use crate::script::Script;

#[derive(Debug, thiserror::Error)]
enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Options(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Svg,
}

#[derive(Parser, Debug)]
#[command(name = "canvas-replay", about = "Replay a recorded gesture script against the canvas engine")]
struct Cli {
    /// Script file with the viewport and input events.
    script: PathBuf,

    /// Canvas options JSON; defaults apply when omitted.
    #[arg(long, env = "CANVAS_OPTIONS")]
    options: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn main() -> Result<(), ReplayError> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let options = match &cli.options {
        Some(path) => CanvasOptions::from_json(&read(path)?)?,
        None => CanvasOptions::default(),
    };
    let script: Script = serde_json::from_str(&read(&cli.script)?)?;
    let viewport = script.viewport();

    let mut engine = CanvasEngine::new(options, ManualScheduler::new())?;
    engine.attach(viewport);
    let report = replay::replay(&mut engine, &script.events);
    tracing::info!(events = report.events, strokes = report.strokes.len(), frames = report.frames, "replay finished");

    match cli.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Svg => print!("{}", replay::to_svg(&report, &viewport)),
    }
    Ok(())
}

fn read(path: &Path) -> Result<String, ReplayError> {
    fs::read_to_string(path).map_err(|source| ReplayError::Read { path: path.to_owned(), source })
}
