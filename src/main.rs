//! Replays head pose samples through a scan session and prints the events.

use anyhow::{Context, Result};
use clap::Parser;
use head_pose_scan::{
    config::{Config, EXAMPLE_CONFIG},
    constants::{DEFAULT_SWEEP_FPS, MAX_SWEEP_FPS},
    replay::{guided_sweep, load_samples, run_replay},
    session::{ScanEvent, ScanSession},
};
use log::{info, warn};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sample log to replay (timestamp_ms pitch_rad yaw_rad per line).
    /// Without it a synthetic guided sweep is used.
    #[arg(short, long)]
    input: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Override the cooldown window in milliseconds
    #[arg(long)]
    cooldown_ms: Option<u64>,

    /// Override the smoothing filter (none, moving_average, median, exponential)
    #[arg(short, long)]
    smoothing: Option<String>,

    /// Frame rate of the synthetic guided sweep
    #[arg(long, default_value_t = DEFAULT_SWEEP_FPS,
          value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_SWEEP_FPS)))]
    fps: u32,

    /// Print an example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            Config::from_file(path).unwrap_or_else(|e| {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            })
        }
        None => Config::default(),
    };
    if let Some(cooldown_ms) = args.cooldown_ms {
        config.cooldown.duration_ms = cooldown_ms;
    }
    if let Some(smoothing) = args.smoothing {
        config.smoothing.filter = smoothing;
    }

    let samples = match &args.input {
        Some(path) => {
            info!("Replaying samples from: {}", path);
            load_samples(path).with_context(|| format!("failed to load samples from {path}"))?
        }
        None => {
            info!("No input given, replaying a guided sweep at {} fps", args.fps);
            guided_sweep(args.fps)
        }
    };

    let mut session = ScanSession::from_config(&config).context("invalid configuration")?;
    let events = run_replay(&mut session, &samples, Instant::now());

    for (offset, event) in &events {
        match event {
            ScanEvent::Detected(pose) => println!("{:>7}ms detected {}", offset.as_millis(), pose),
            ScanEvent::CycleCompleted => println!("{:>7}ms cycle completed", offset.as_millis()),
            ScanEvent::NoChange | ScanEvent::Rejected => {}
        }
    }

    let progress = session.progress();
    println!(
        "{} samples, {} classified, {} cycles completed, {} poses detected in current cycle",
        samples.len(),
        events.len(),
        progress.cycles_completed,
        progress.detected.len()
    );

    Ok(())
}
