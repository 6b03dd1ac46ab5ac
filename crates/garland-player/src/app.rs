//! The tree application: owns every system and runs one frame at a time
//!
//! The host (window loop, CLI, tests) feeds it the assembled flag and the
//! music toggle, calls `frame` once per rendered frame, and reads the
//! instance buffers back out of the renderer.

use crate::config::GarlandConfig;
use garland_animation::{AnimationDriver, AssemblyPhase};
use garland_audio::AudioSystem;
use garland_core::Result;
use garland_particles::ParticleStore;
use garland_render::{FrameStats, InstanceRenderer, ParticleSystem};
use garland_runtime::{
    AssembledSignal, EventBus, FrameClock, FrameContext, RuntimeSystem, TreeEvent,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::Arc;

/// Snapshot of one frame, for logging and headless inspection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub elapsed: f64,
    pub assembled: bool,
    pub progress: f32,
    pub eased: f32,
    pub phase: AssemblyPhase,
    pub music_playing: bool,
    pub stats: FrameStats,
    /// Events delivered to the systems this frame
    pub events: Vec<TreeEvent>,
}

pub struct TreeApp {
    config: GarlandConfig,
    store: Arc<ParticleStore>,

    // Systems
    particles: ParticleSystem,
    audio: AudioSystem,

    // Inputs
    signal: AssembledSignal,
    events: EventBus,
    music_playing: bool,

    pub clock: FrameClock,
    shut_down: bool,
}

impl TreeApp {
    /// Generate the tree and start every system, with audio per `config`
    pub fn new(config: GarlandConfig) -> Result<Self> {
        let audio = AudioSystem::from_settings(&config.audio);
        Self::with_audio(config, audio)
    }

    /// Same as `new` with a caller-supplied audio system
    pub fn with_audio(config: GarlandConfig, mut audio: AudioSystem) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let store = Arc::new(ParticleStore::generate(config.particles, &mut rng)?);

        let mut driver = AnimationDriver::new(config.animation.speed);
        driver.easing = config.animation.easing;
        let mut particles = ParticleSystem::new(store.clone(), driver);

        particles.initialize()?;
        audio.initialize()?;

        Ok(Self {
            config,
            store,
            particles,
            audio,
            signal: AssembledSignal::default(),
            events: EventBus::new(),
            music_playing: false,
            clock: FrameClock::new(),
            shut_down: false,
        })
    }

    pub fn config(&self) -> &GarlandConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<ParticleStore> {
        &self.store
    }

    pub fn renderer(&self) -> &InstanceRenderer {
        &self.particles.renderer
    }

    /// Mutable access for the consumer to mount layers or clear upload flags
    pub fn renderer_mut(&mut self) -> &mut InstanceRenderer {
        &mut self.particles.renderer
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.particles.driver
    }

    pub fn is_assembled(&self) -> bool {
        self.signal.get()
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Set the assembled flag; a repeat of the current value does nothing
    pub fn set_assembled(&mut self, assembled: bool) -> bool {
        let event = self.signal.set(assembled);
        let changed = event.is_some();
        self.events.push_some(event);
        changed
    }

    /// Flip the assembled flag, returning the new value
    pub fn toggle_assembled(&mut self) -> bool {
        let event = self.signal.toggle();
        self.events.push(event);
        self.signal.get()
    }

    /// Switch the music box on or off, returning the new state
    pub fn toggle_music(&mut self) -> bool {
        self.music_playing = !self.music_playing;
        self.events.push(TreeEvent::MusicToggled {
            playing: self.music_playing,
        });
        self.music_playing
    }

    /// Advance by an explicit delta (seconds)
    pub fn frame(&mut self, delta: f64) -> Result<FrameReport> {
        self.clock.advance(delta);
        self.run_frame()
    }

    /// Advance by the wall-clock time since the previous call
    pub fn frame_realtime(&mut self) -> Result<FrameReport> {
        self.clock.tick();
        self.run_frame()
    }

    fn run_frame(&mut self) -> Result<FrameReport> {
        let events = self.events.drain();
        let context = FrameContext {
            delta: self.clock.delta_f32(),
            elapsed: self.clock.elapsed_f32(),
            assembled: self.signal.get(),
            events: &events,
        };

        self.particles.update(&context)?;
        // Audio never takes the visuals down with it
        if let Err(e) = self.audio.update(&context) {
            log::warn!("Audio update failed: {e}");
        }

        for event in &events {
            log::debug!("Frame {}: {event:?}", self.clock.frame_count);
        }

        let driver = &self.particles.driver;
        Ok(FrameReport {
            frame: self.clock.frame_count,
            elapsed: self.clock.total_time,
            assembled: self.signal.get(),
            progress: driver.progress().value(),
            eased: driver.eased(),
            phase: driver.phase(),
            music_playing: self.music_playing,
            stats: self.particles.last_stats(),
            events,
        })
    }

    /// Stop every system. Safe to call more than once.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.shut_down {
            return Ok(());
        }
        self.shut_down = true;
        self.audio.shutdown()?;
        self.particles.shutdown()?;
        log::info!("Tree shut down after {} frames", self.clock.frame_count);
        Ok(())
    }
}

impl Drop for TreeApp {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::warn!("Shutdown failed: {e}");
        }
    }
}
