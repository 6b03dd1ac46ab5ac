//! Audio engine wrapping Kira's AudioManager
//!
//! Plays synthesized buffers as static sounds, optionally delayed so notes
//! land on their scheduled time. Degrades to silence when no audio device
//! is available and retries the device on the next explicit request.

use crate::synth::{self, SAMPLE_RATE};
use garland_core::{GarlandError, Result};
use kira::sound::static_sound::{StaticSoundData, StaticSoundSettings};
use kira::{AudioManager, AudioManagerSettings, DefaultBackend, Frame, StartTime};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Something the director can play
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sound {
    /// One music box tine; `duration` is the nominal note length in seconds
    Note { frequency: f32, duration: f64 },
    Thud,
    Swoosh,
}

impl Sound {
    fn cache_key(&self) -> String {
        match self {
            Sound::Note {
                frequency,
                duration,
            } => format!("note:{frequency:.2}:{duration:.4}"),
            Sound::Thud => "thud".into(),
            Sound::Swoosh => "swoosh".into(),
        }
    }

    /// Render the sound to mono samples
    pub fn synthesize(&self) -> Vec<f32> {
        match *self {
            Sound::Note {
                frequency,
                duration,
            } => synth::music_box_note(frequency, duration, SAMPLE_RATE),
            Sound::Thud => synth::thud(SAMPLE_RATE),
            Sound::Swoosh => synth::swoosh(&mut rand::rng(), SAMPLE_RATE),
        }
    }
}

/// Destination for director playback
pub trait AudioOutput {
    /// Try to make the device usable; returns whether it is
    fn ensure_available(&mut self) -> bool;

    /// Play `sound` after `delay` at linear `volume`
    fn play(&mut self, sound: Sound, delay: Duration, volume: f64) -> Result<()>;
}

/// Wraps Kira's AudioManager with a cache of synthesized sounds
pub struct AudioEngine {
    manager: Option<AudioManager<DefaultBackend>>,
    sound_cache: HashMap<String, StaticSoundData>,
    master_volume: f64,
    warned: bool,
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl AudioEngine {
    pub fn new(master_volume: f64) -> Self {
        let mut engine = Self {
            manager: None,
            sound_cache: HashMap::new(),
            master_volume,
            warned: false,
        };
        engine.connect();
        engine
    }

    fn connect(&mut self) {
        match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(manager) => {
                if self.warned {
                    log::info!("Audio device available, music box enabled");
                }
                self.manager = Some(manager);
            }
            Err(e) if !self.warned => {
                log::warn!("No audio device available ({e}), running silent");
                self.warned = true;
            }
            Err(e) => log::debug!("Audio device still unavailable: {e}"),
        }
    }

    /// Whether audio is actually available
    pub fn is_available(&self) -> bool {
        self.manager.is_some()
    }

    pub fn master_volume(&self) -> f64 {
        self.master_volume
    }

    pub fn set_master_volume(&mut self, volume: f64) {
        self.master_volume = volume.max(0.0);
    }

    /// Check if a sound is already synthesized
    pub fn has_sound(&self, sound: Sound) -> bool {
        self.sound_cache.contains_key(&sound.cache_key())
    }

    /// Cached static sound for `sound`, synthesizing it on first use
    fn sound_data(&mut self, sound: Sound) -> StaticSoundData {
        self.sound_cache
            .entry(sound.cache_key())
            .or_insert_with(|| to_static_sound(&sound.synthesize()))
            .clone()
    }
}

impl AudioOutput for AudioEngine {
    fn ensure_available(&mut self) -> bool {
        if self.manager.is_none() {
            self.connect();
        }
        self.is_available()
    }

    fn play(&mut self, sound: Sound, delay: Duration, volume: f64) -> Result<()> {
        if self.manager.is_none() {
            return Ok(());
        }

        let data = self
            .sound_data(sound)
            .volume(amplitude_to_db(volume * self.master_volume))
            .start_time(StartTime::Delayed(delay));

        if let Some(manager) = &mut self.manager {
            manager
                .play(data)
                .map_err(|e| GarlandError::AudioError(format!("Failed to play {sound:?}: {e}")))?;
        }
        Ok(())
    }
}

/// Wrap mono samples as a Kira static sound
pub fn to_static_sound(samples: &[f32]) -> StaticSoundData {
    StaticSoundData {
        sample_rate: SAMPLE_RATE,
        frames: samples.iter().map(|s| Frame::from_mono(*s)).collect::<Arc<[Frame]>>(),
        settings: StaticSoundSettings::default(),
        slice: None,
    }
}

/// Convert linear amplitude (0.0–2.0) to decibels
fn amplitude_to_db(amplitude: f64) -> kira::Decibels {
    if amplitude <= 0.0 {
        kira::Decibels(-60.0) // silence
    } else {
        kira::Decibels((20.0 * (amplitude as f32).log10()).max(-60.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_graceful_degradation() {
        // Must not fail whether or not the host has an audio device
        let mut engine = AudioEngine::new(0.0);
        engine.ensure_available();
        let result = engine.play(Sound::Thud, Duration::ZERO, 1.0);
        assert!(result.is_ok());
    }

    #[test]
    fn test_static_sound_frames() {
        let data = to_static_sound(&[0.0, 0.5, -0.5]);
        assert_eq!(data.sample_rate, SAMPLE_RATE);
        assert_eq!(data.frames.len(), 3);
        assert_eq!(data.frames[1].left, 0.5);
        assert_eq!(data.frames[1].right, 0.5);
    }

    #[test]
    fn test_cache_keys_distinguish_notes() {
        let a = Sound::Note {
            frequency: 392.0,
            duration: 0.9,
        };
        let b = Sound::Note {
            frequency: 392.0,
            duration: 0.3,
        };
        assert_ne!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key(), a.cache_key());
        assert_eq!(Sound::Thud.cache_key(), "thud");
    }

    #[test]
    fn test_amplitude_to_db() {
        assert_eq!(amplitude_to_db(0.0).0, -60.0);
        assert!(amplitude_to_db(1.0).0.abs() < 1e-6);
        assert!((amplitude_to_db(0.5).0 + 6.0206).abs() < 1e-3);
    }
}
