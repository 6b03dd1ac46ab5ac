//! Layered configuration system
//!
//! Config is loaded with four layers of precedence (highest wins):
//! 1. Environment variables: `GARLAND_*`
//! 2. An explicit `--config` path, or `./garland.toml` when none is given
//! 3. Global: `~/.garland/config.toml`
//! 4. Built-in defaults

use garland_animation::{Easing, ANIMATION_SPEED};
use garland_audio::{DirectorSettings, MAX_TEMPO_BPM, MIN_TEMPO_BPM};
use garland_core::{GarlandError, Result};
use garland_particles::ParticleCounts;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Animation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Progress units per second
    pub speed: f32,
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            speed: ANIMATION_SPEED,
            easing: Easing::CubicInOut,
        }
    }
}

/// Fully resolved configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GarlandConfig {
    /// Fixed generation seed; random per session when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub particles: ParticleCounts,
    pub animation: AnimationConfig,
    pub audio: DirectorSettings,
}

/// One config file. Every field is optional so that layers only override
/// what they actually set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub particles: ParticlesLayer,
    #[serde(default)]
    pub animation: AnimationLayer,
    #[serde(default)]
    pub audio: AudioLayer,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParticlesLayer {
    pub foliage: Option<usize>,
    pub ornaments: Option<usize>,
    pub gifts: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationLayer {
    pub speed: Option<f32>,
    pub easing: Option<Easing>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudioLayer {
    pub enabled: Option<bool>,
    pub volume: Option<f64>,
    pub tempo_bpm: Option<f32>,
}

/// Name of the project-local config file
pub const LOCAL_CONFIG_FILE: &str = "garland.toml";

impl GarlandConfig {
    /// Load config with layered precedence: global < local (or explicit) < env vars
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = GarlandConfig::default();

        // Layer 1: Global config (~/.garland/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.apply(Self::load_file(&global_path)?);
            }
        }

        // Layer 2: explicit path (must exist) or ./garland.toml (optional)
        match explicit {
            Some(path) => config.apply(Self::load_file(path)?),
            None => {
                let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
                if local_path.exists() {
                    config.apply(Self::load_file(&local_path)?);
                }
            }
        }

        // Layer 3: Environment variable overrides
        config.apply_env_overrides(|key| std::env::var(key).ok())?;

        config.validate()?;
        log::debug!("Resolved config: {config:?}");
        Ok(config)
    }

    /// Load config from a specific file path only, on top of defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = GarlandConfig::default();
        config.apply(Self::load_file(path)?);
        config.validate()?;
        Ok(config)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".garland").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<ConfigLayer> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            GarlandError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    /// Overlay the fields a layer sets
    pub fn apply(&mut self, layer: ConfigLayer) {
        if layer.seed.is_some() {
            self.seed = layer.seed;
        }

        let particles = layer.particles;
        if let Some(n) = particles.foliage {
            self.particles.foliage = n;
        }
        if let Some(n) = particles.ornaments {
            self.particles.ornaments = n;
        }
        if let Some(n) = particles.gifts {
            self.particles.gifts = n;
        }

        if let Some(speed) = layer.animation.speed {
            self.animation.speed = speed;
        }
        if let Some(easing) = layer.animation.easing {
            self.animation.easing = easing;
        }

        let audio = layer.audio;
        if let Some(enabled) = audio.enabled {
            self.audio.enabled = enabled;
        }
        if let Some(volume) = audio.volume {
            self.audio.volume = volume;
        }
        if let Some(tempo) = audio.tempo_bpm {
            self.audio.tempo_bpm = tempo;
        }
    }

    /// Apply `GARLAND_*` overrides read through `lookup`
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        if let Some(seed) = env_value(&lookup, "GARLAND_SEED")? {
            self.seed = Some(seed);
        }
        if let Some(n) = env_value(&lookup, "GARLAND_FOLIAGE_COUNT")? {
            self.particles.foliage = n;
        }
        if let Some(n) = env_value(&lookup, "GARLAND_ORNAMENT_COUNT")? {
            self.particles.ornaments = n;
        }
        if let Some(n) = env_value(&lookup, "GARLAND_GIFT_COUNT")? {
            self.particles.gifts = n;
        }
        if let Some(speed) = env_value(&lookup, "GARLAND_ANIMATION_SPEED")? {
            self.animation.speed = speed;
        }
        if let Some(raw) = lookup("GARLAND_AUDIO") {
            self.audio.enabled = parse_switch(&raw).ok_or_else(|| {
                GarlandError::ConfigError(format!("GARLAND_AUDIO: expected on/off, got '{raw}'"))
            })?;
        }
        if let Some(volume) = env_value(&lookup, "GARLAND_VOLUME")? {
            self.audio.volume = volume;
        }
        if let Some(tempo) = env_value(&lookup, "GARLAND_TEMPO")? {
            self.audio.tempo_bpm = tempo;
        }
        Ok(())
    }

    /// Reject settings the tree cannot run with
    pub fn validate(&self) -> Result<()> {
        for (name, count) in [
            ("foliage", self.particles.foliage),
            ("ornaments", self.particles.ornaments),
            ("gifts", self.particles.gifts),
        ] {
            if count == 0 {
                return Err(GarlandError::ConfigError(format!(
                    "particles.{name} must be at least 1"
                )));
            }
        }
        let speed = self.animation.speed;
        if !(speed.is_finite() && speed > 0.0) {
            return Err(GarlandError::ConfigError(format!(
                "animation.speed must be positive, got {speed}"
            )));
        }
        let volume = self.audio.volume;
        if !(volume.is_finite() && volume >= 0.0) {
            return Err(GarlandError::ConfigError(format!(
                "audio.volume must be a non-negative number, got {volume}"
            )));
        }
        let tempo = self.audio.tempo_bpm;
        if !(MIN_TEMPO_BPM..=MAX_TEMPO_BPM).contains(&tempo) {
            return Err(GarlandError::ConfigError(format!(
                "audio.tempo_bpm must be between {MIN_TEMPO_BPM} and {MAX_TEMPO_BPM}, got {tempo}"
            )));
        }
        Ok(())
    }

    /// Render as TOML, the same shape a config file uses
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn env_value<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| GarlandError::ConfigError(format!("{key}: {e}"))),
    }
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::TempDir;

    fn temp_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("garland.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GarlandConfig::default();
        assert_eq!(config.particles.foliage, 7000);
        assert_eq!(config.particles.ornaments, 225);
        assert_eq!(config.particles.gifts, 225);
        assert_eq!(config.animation.speed, 2.0);
        assert!(config.audio.enabled);
        assert_eq!(config.audio.tempo_bpm, 100.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = TempDir::new().unwrap();
        let path = temp_config(
            &dir,
            r#"
seed = 42

[particles]
foliage = 500

[animation]
speed = 4.0
easing = "linear"

[audio]
enabled = false
"#,
        );
        let config = GarlandConfig::load_from_file(&path).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.particles.foliage, 500);
        assert_eq!(config.particles.gifts, 225);
        assert_eq!(config.animation.speed, 4.0);
        assert_eq!(config.animation.easing, Easing::Linear);
        assert!(!config.audio.enabled);
        assert_eq!(config.audio.volume, 1.0);
    }

    #[test]
    fn test_later_layers_override_only_what_they_set() {
        let mut config = GarlandConfig::default();
        config.apply(toml::from_str("[particles]\nfoliage = 10\ngifts = 3").unwrap());
        config.apply(toml::from_str("[particles]\ngifts = 5").unwrap());
        assert_eq!(config.particles.foliage, 10);
        assert_eq!(config.particles.gifts, 5);
        assert_eq!(config.particles.ornaments, 225);
    }

    #[test]
    fn test_env_overrides_win() {
        let mut config = GarlandConfig::default();
        config.apply(toml::from_str("[animation]\nspeed = 3.0").unwrap());
        config
            .apply_env_overrides(env(&[
                ("GARLAND_ANIMATION_SPEED", "0.5"),
                ("GARLAND_AUDIO", "off"),
                ("GARLAND_FOLIAGE_COUNT", " 64 "),
                ("GARLAND_SEED", "7"),
            ]))
            .unwrap();
        assert_eq!(config.animation.speed, 0.5);
        assert!(!config.audio.enabled);
        assert_eq!(config.particles.foliage, 64);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_bad_env_value_is_config_error() {
        let mut config = GarlandConfig::default();
        let err = config
            .apply_env_overrides(env(&[("GARLAND_GIFT_COUNT", "lots")]))
            .unwrap_err();
        assert!(matches!(err, GarlandError::ConfigError(_)));

        let err = config
            .apply_env_overrides(env(&[("GARLAND_AUDIO", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, GarlandError::ConfigError(_)));
    }

    #[test]
    fn test_zero_count_rejected() {
        let dir = TempDir::new().unwrap();
        let path = temp_config(&dir, "[particles]\nornaments = 0\n");
        let err = GarlandConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, GarlandError::ConfigError(msg) if msg.contains("ornaments")));
    }

    #[test]
    fn test_stalled_animation_rejected() {
        let dir = TempDir::new().unwrap();
        let path = temp_config(&dir, "[animation]\nspeed = 0.0\n");
        let err = GarlandConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, GarlandError::ConfigError(msg) if msg.contains("animation.speed")));
    }

    #[test]
    fn test_tempo_out_of_range_rejected() {
        let dir = TempDir::new().unwrap();
        let path = temp_config(&dir, "[audio]\ntempo_bpm = 1e30\n");
        let err = GarlandConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, GarlandError::ConfigError(msg) if msg.contains("tempo_bpm")));

        for tempo in ["10000000", "0.5"] {
            let mut config = GarlandConfig::default();
            config
                .apply_env_overrides(env(&[("GARLAND_TEMPO", tempo)]))
                .unwrap();
            assert!(config.validate().is_err(), "accepted {tempo} BPM");
        }

        let mut config = GarlandConfig::default();
        config.audio.tempo_bpm = 1000.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = TempDir::new().unwrap();
        let path = temp_config(&dir, "[particles]\nsnowflakes = 9\n");
        assert!(matches!(
            GarlandConfig::load_from_file(&path),
            Err(GarlandError::ConfigError(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            GarlandConfig::load_from_file(&missing),
            Err(GarlandError::IoError(_))
        ));
    }

    #[test]
    fn test_toml_output_reloads() {
        let mut config = GarlandConfig::default();
        config.seed = Some(9);
        config.particles.gifts = 12;
        let text = config.to_toml().unwrap();
        let dir = TempDir::new().unwrap();
        let path = temp_config(&dir, &text);
        assert_eq!(GarlandConfig::load_from_file(&path).unwrap(), config);
    }
}
