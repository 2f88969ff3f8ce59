//! Headless runner: loads a map, replays scripted input and logs the outcome.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use mariana::{init_logging, GameConfig, InputScript, Level};

/// Headless runner for Mariana levels
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Map file to load
    map: PathBuf,

    /// JSON file overriding the default tuning
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON input script to replay
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Minimum number of frames to simulate
    #[arg(short, long, default_value_t = 60)]
    frames: u64,

    /// Time step per frame, in frames
    #[arg(short, long, default_value_t = 1.0)]
    delta: f64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => GameConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let script = match &args.script {
        Some(path) => InputScript::from_path(path)
            .with_context(|| format!("loading script {}", path.display()))?,
        None => InputScript::default(),
    };
    let mut level = Level::load(&args.map, &config)
        .with_context(|| format!("loading map {}", args.map.display()))?;
    info!(
        "loaded {} ({}x{} tiles)",
        args.map.display(),
        level.map().width(),
        level.map().height()
    );
    let frames = script.play(&mut level, args.delta, args.frames);
    info!(
        "finished after {frames} frames; {} tiles visible",
        level.visible_tiles().len()
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(&args) {
        error!("{err:#}");
        std::process::exit(1);
    }
}
