//! Generate command — builds the particle store and summarizes it

use super::load_config;
use anyhow::{Context, Result};
use garland_particles::{Bounds, ParticleClass, ParticleStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

pub struct GenerateArgs<'a> {
    pub config: Option<&'a Path>,
    pub seed: Option<u64>,
    pub json: Option<PathBuf>,
}

pub fn run(args: GenerateArgs<'_>) -> Result<()> {
    let config = load_config(args.config)?;
    let seed = args.seed.or(config.seed);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let store =
        ParticleStore::generate(config.particles, &mut rng).context("Failed to generate tree")?;

    match seed {
        Some(seed) => println!("Generated tree (seed {seed})"),
        None => println!("Generated tree (random seed)"),
    }
    println!("{:<10} {:>6}  {:<36}  scattered", "class", "count", "assembled");
    for class in ParticleClass::ALL {
        println!(
            "{:<10} {:>6}  {:<36}  {}",
            class.name(),
            store.collection(class).len(),
            format_bounds(store.target_bounds(class)),
            format_bounds(store.start_bounds(class)),
        );
    }
    println!("total      {:>6}", store.counts().total());

    if let Some(path) = args.json {
        let json = serde_json::to_string_pretty(&store.to_tree())?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn format_bounds(bounds: Option<Bounds>) -> String {
    match bounds {
        Some(b) => format!(
            "[{:.2}, {:.2}, {:.2}]..[{:.2}, {:.2}, {:.2}]",
            b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
        ),
        None => "-".to_string(),
    }
}
