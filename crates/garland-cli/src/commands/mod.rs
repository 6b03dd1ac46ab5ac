//! CLI command implementations

pub mod config;
pub mod generate;
pub mod play;
pub mod simulate;

use anyhow::{Context, Result};
use garland_player::GarlandConfig;
use std::path::Path;

/// Resolve configuration, with a readable error for the CLI
pub fn load_config(path: Option<&Path>) -> Result<GarlandConfig> {
    GarlandConfig::load(path).context("Failed to load configuration")
}
