//! Config command — prints the resolved configuration

use super::load_config;
use anyhow::Result;
use garland_player::config::LOCAL_CONFIG_FILE;
use garland_player::GarlandConfig;
use std::path::Path;

pub fn run(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;

    if let Some(global) = GarlandConfig::global_config_path() {
        println!("# global: {}", global.display());
    }
    match path {
        Some(p) => println!("# file:   {}", p.display()),
        None => println!("# local:  {LOCAL_CONFIG_FILE}"),
    }
    println!();
    print!("{}", config.to_toml()?);

    Ok(())
}
