//! Simulate command — deterministic headless run of the frame loop

use super::load_config;
use anyhow::{Context, Result};
use garland_player::TreeApp;
use std::path::Path;

pub struct SimulateArgs<'a> {
    pub config: Option<&'a Path>,
    pub frames: u64,
    pub dt: f64,
    pub toggle_at: Vec<u64>,
    pub seed: Option<u64>,
    pub json: bool,
    pub audio: bool,
}

pub fn run(args: SimulateArgs<'_>) -> Result<()> {
    if !(args.dt.is_finite() && args.dt >= 0.0) {
        anyhow::bail!("--dt must be a non-negative number, got {}", args.dt);
    }

    let mut config = load_config(args.config)?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.audio.enabled &= args.audio;

    let mut app = TreeApp::new(config).context("Failed to start tree")?;

    if !args.json {
        println!(
            "{:>6} {:>8} {:>9} {:>8} {:>8}  {:<10}",
            "frame", "time", "assembled", "progress", "eased", "phase"
        );
    }

    for frame in 0..args.frames {
        if args.toggle_at.contains(&frame) {
            app.toggle_assembled();
        }
        let report = app.frame(args.dt)?;

        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!(
                "{:>6} {:>8.3} {:>9} {:>8.4} {:>8.4}  {:<10}",
                report.frame,
                report.elapsed,
                report.assembled,
                report.progress,
                report.eased,
                report.phase.to_string()
            );
        }
    }

    app.shutdown()?;
    Ok(())
}
