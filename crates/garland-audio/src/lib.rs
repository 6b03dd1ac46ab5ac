//! Garland Audio — Music box and transition cues (Kira backend)
//!
//! Provides the procedural soundtrack for the tree:
//! - `Melody` / `LookaheadScheduler` — looping "Silent Night" with lookahead timing
//! - `synth` — offline synthesis of notes, the thud and the swoosh
//! - `AudioEngine` — wraps Kira AudioManager, plays synthesized buffers
//! - `AudioDirector` — owns the audio thread; fire-and-forget commands
//! - `AudioSystem` — implements `RuntimeSystem`, reacting to tree events

pub mod director;
pub mod engine;
pub mod melody;
pub mod scheduler;
pub mod synth;

use garland_core::Result;
use garland_runtime::{FrameContext, RuntimeSystem, TreeEvent};

pub use director::{AudioDirector, Cue, DirectorCommand, DirectorSettings, DirectorWorker};
pub use engine::{AudioEngine, AudioOutput, Sound};
pub use melody::{Melody, Note, MAX_TEMPO_BPM, MIN_TEMPO_BPM, SILENT_NIGHT};
pub use scheduler::{LookaheadScheduler, ScheduledNote, SchedulerPoll};

/// Routes tree events to the audio director
pub struct AudioSystem {
    pub director: AudioDirector,
}

impl AudioSystem {
    pub fn new(director: AudioDirector) -> Self {
        Self { director }
    }

    /// Build a director from settings, falling back to silence on failure
    pub fn from_settings(settings: &DirectorSettings) -> Self {
        let director = AudioDirector::new(settings).unwrap_or_else(|e| {
            log::warn!("Audio unavailable ({e}), running silent");
            AudioDirector::disabled()
        });
        Self::new(director)
    }

    /// React to a batch of events raised since the previous frame
    pub fn process_events(&mut self, events: &[TreeEvent]) {
        for event in events {
            match *event {
                TreeEvent::AssembledChanged { assembled } => {
                    self.director.on_assembled_changed(assembled)
                }
                TreeEvent::MusicToggled { playing: true } => self.director.ambient_start(),
                TreeEvent::MusicToggled { playing: false } => self.director.ambient_stop(),
            }
        }
    }
}

impl RuntimeSystem for AudioSystem {
    fn initialize(&mut self) -> Result<()> {
        if !self.director.is_enabled() {
            log::info!("Audio: running silent");
        }
        Ok(())
    }

    fn update(&mut self, frame: &FrameContext<'_>) -> Result<()> {
        self.process_events(frame.events);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.director.shutdown();
        Ok(())
    }

    fn name(&self) -> &str {
        "audio"
    }
}
