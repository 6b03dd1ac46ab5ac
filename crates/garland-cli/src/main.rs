//! Garland CLI - generate, simulate and play the particle tree

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, generate, play, simulate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "garland")]
#[command(about = "A luxury Christmas tree of instanced particles", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file to use instead of ./garland.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the particle store and print a summary
    Generate {
        /// Seed for a reproducible layout
        #[arg(long)]
        seed: Option<u64>,

        /// Write all particles as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Run the animation headless with a fixed time step
    Simulate {
        /// Number of frames to run
        #[arg(long, default_value = "90")]
        frames: u64,

        /// Seconds per frame
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,

        /// Frames at which the assembled flag flips (comma-separated)
        #[arg(long, value_delimiter = ',', default_value = "0")]
        toggle_at: Vec<u64>,

        /// Seed for a reproducible layout
        #[arg(long)]
        seed: Option<u64>,

        /// Print one JSON report per frame
        #[arg(long)]
        json: bool,

        /// Keep the audio director running during the simulation
        #[arg(long)]
        audio: bool,
    },

    /// Run the tree in real time, driven from stdin
    Play {
        /// Target frames per second
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Start with the music box playing
        #[arg(long)]
        music: bool,
    },

    /// Print the resolved configuration as TOML
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Generate { seed, json } => generate::run(generate::GenerateArgs {
            config: config_path,
            seed,
            json,
        }),
        Commands::Simulate {
            frames,
            dt,
            toggle_at,
            seed,
            json,
            audio,
        } => simulate::run(simulate::SimulateArgs {
            config: config_path,
            frames,
            dt,
            toggle_at,
            seed,
            json,
            audio,
        }),
        Commands::Play { fps, music } => play::run(play::PlayArgs {
            config: config_path,
            fps,
            music,
        }),
        Commands::Config => config::run(config_path),
    }
}
