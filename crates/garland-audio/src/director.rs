//! The audio director: music box loop and transition cues on their own thread

use crate::engine::{AudioEngine, AudioOutput, Sound};
use crate::melody::{Melody, DEFAULT_TEMPO_BPM};
use crate::scheduler::{LookaheadScheduler, WAKE_INTERVAL};
use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use garland_core::Result;
use serde::{Deserialize, Serialize};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Audio settings handed to the director at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectorSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Linear master volume
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default = "default_tempo")]
    pub tempo_bpm: f32,
}

fn default_enabled() -> bool {
    true
}
fn default_volume() -> f64 {
    1.0
}
fn default_tempo() -> f32 {
    DEFAULT_TEMPO_BPM
}

impl Default for DirectorSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            volume: default_volume(),
            tempo_bpm: default_tempo(),
        }
    }
}

/// One-shot sound effect for a transition of the assembled flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Assemble,
    Disassemble,
}

impl Cue {
    pub fn for_transition(assembled: bool) -> Self {
        if assembled {
            Cue::Assemble
        } else {
            Cue::Disassemble
        }
    }

    /// Assembling swooshes in; scattering lands with a thud
    pub fn sound(self) -> Sound {
        match self {
            Cue::Assemble => Sound::Swoosh,
            Cue::Disassemble => Sound::Thud,
        }
    }
}

/// Messages sent to the audio thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DirectorCommand {
    StartAmbient,
    StopAmbient,
    Cue(Cue),
    Shutdown,
}

/// State owned by the audio thread.
///
/// Kept separate from the thread loop so it can be driven with explicit
/// timestamps.
pub struct DirectorWorker<O: AudioOutput> {
    output: O,
    scheduler: LookaheadScheduler,
    volume: f64,
}

impl<O: AudioOutput> DirectorWorker<O> {
    pub fn new(output: O, melody: Melody, volume: f64) -> Self {
        Self {
            output,
            scheduler: LookaheadScheduler::new(melody),
            volume,
        }
    }

    pub fn is_ambient_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Apply one command at time `now` (seconds on the worker's clock)
    pub fn handle(&mut self, command: DirectorCommand, now: f64) {
        match command {
            DirectorCommand::StartAmbient => {
                if !self.output.ensure_available() {
                    log::debug!("Music box not started: no audio device");
                    return;
                }
                if self.scheduler.start(now) {
                    log::info!("Music box started");
                }
            }
            DirectorCommand::StopAmbient => {
                if self.scheduler.is_running() {
                    log::info!("Music box stopped");
                }
                self.scheduler.stop();
            }
            DirectorCommand::Cue(cue) => {
                if !self.output.ensure_available() {
                    return;
                }
                if let Err(e) = self.output.play(cue.sound(), Duration::ZERO, self.volume) {
                    log::debug!("Cue {cue:?} dropped: {e}");
                }
            }
            DirectorCommand::Shutdown => self.scheduler.stop(),
        }
    }

    /// Hand every note due within the lookahead window to the output
    pub fn wake(&mut self, now: f64) {
        for note in self.scheduler.poll(now).notes {
            let delay = Duration::from_secs_f64((note.time - now).max(0.0));
            let sound = Sound::Note {
                frequency: note.frequency,
                duration: note.duration,
            };
            if let Err(e) = self.output.play(sound, delay, self.volume) {
                log::debug!("Note {} Hz dropped: {e}", note.frequency);
            }
        }
    }
}

fn run<O: AudioOutput>(mut worker: DirectorWorker<O>, commands: Receiver<DirectorCommand>) {
    let epoch = Instant::now();
    let now = || epoch.elapsed().as_secs_f64();

    loop {
        let received = if worker.is_ambient_running() {
            commands.recv_timeout(WAKE_INTERVAL)
        } else {
            commands
                .recv()
                .map_err(|_| RecvTimeoutError::Disconnected)
        };

        match received {
            Ok(DirectorCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Ok(command) => worker.handle(command, now()),
            Err(RecvTimeoutError::Timeout) => {}
        }
        worker.wake(now());
    }
    log::debug!("Audio thread exiting");
}

/// Owns the audio thread and talks to it with fire-and-forget commands.
///
/// A disabled director has no thread; every call is a no-op. Dropping the
/// director stops the thread.
pub struct AudioDirector {
    sender: Option<Sender<DirectorCommand>>,
    thread: Option<JoinHandle<()>>,
    ambient_requested: bool,
}

impl AudioDirector {
    /// Director backed by the Kira engine, or a silent one when disabled
    pub fn new(settings: &DirectorSettings) -> Result<Self> {
        if !settings.enabled {
            log::info!("Audio disabled by configuration");
            return Ok(Self::disabled());
        }
        let volume = settings.volume;
        Self::with_output(settings, move || AudioEngine::new(volume))
    }

    /// Spawn the audio thread with a custom output.
    ///
    /// The output is built on the audio thread itself, so it need not be `Send`.
    pub fn with_output<O, F>(settings: &DirectorSettings, make_output: F) -> Result<Self>
    where
        O: AudioOutput + 'static,
        F: FnOnce() -> O + Send + 'static,
    {
        let melody = Melody::silent_night(settings.tempo_bpm)?;
        let (sender, receiver) = channel::unbounded();

        let thread = std::thread::Builder::new()
            .name("garland-audio".into())
            .spawn(move || {
                // Volume is applied by the output's master gain
                let worker = DirectorWorker::new(make_output(), melody, 1.0);
                run(worker, receiver);
            })?;

        Ok(Self {
            sender: Some(sender),
            thread: Some(thread),
            ambient_requested: false,
        })
    }

    pub fn disabled() -> Self {
        Self {
            sender: None,
            thread: None,
            ambient_requested: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    fn send(&self, command: DirectorCommand) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(command).is_err() {
            log::debug!("Audio thread gone, dropped {command:?}");
        }
    }

    /// Start the looping music box. Idempotent.
    pub fn ambient_start(&mut self) {
        self.ambient_requested = true;
        self.send(DirectorCommand::StartAmbient);
    }

    pub fn ambient_stop(&mut self) {
        self.ambient_requested = false;
        self.send(DirectorCommand::StopAmbient);
    }

    /// Whether the music box has been asked to play. The worker may still be
    /// silent when no audio device is available or the director is disabled.
    pub fn is_ambient_requested(&self) -> bool {
        self.ambient_requested
    }

    pub fn cue_on_assemble(&self) {
        self.send(DirectorCommand::Cue(Cue::Assemble));
    }

    pub fn cue_on_disassemble(&self) {
        self.send(DirectorCommand::Cue(Cue::Disassemble));
    }

    /// Play the cue matching a transition of the assembled flag
    pub fn on_assembled_changed(&self, assembled: bool) {
        self.send(DirectorCommand::Cue(Cue::for_transition(assembled)));
    }

    /// Stop the audio thread and wait for it to exit
    pub fn shutdown(&mut self) {
        self.send(DirectorCommand::Shutdown);
        self.sender = None;
        self.ambient_requested = false;
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::warn!("Audio thread panicked");
            }
        }
    }
}

impl Drop for AudioDirector {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    type PlayLog = Arc<Mutex<Vec<(Sound, Duration)>>>;

    struct RecordingOutput {
        log: PlayLog,
        available: Arc<AtomicBool>,
    }

    impl AudioOutput for RecordingOutput {
        fn ensure_available(&mut self) -> bool {
            self.available.load(Ordering::SeqCst)
        }

        fn play(&mut self, sound: Sound, delay: Duration, _volume: f64) -> Result<()> {
            if self.available.load(Ordering::SeqCst) {
                self.log.lock().unwrap().push((sound, delay));
            }
            Ok(())
        }
    }

    fn recorder(available: bool) -> (RecordingOutput, PlayLog, Arc<AtomicBool>) {
        let log = PlayLog::default();
        let flag = Arc::new(AtomicBool::new(available));
        let output = RecordingOutput {
            log: log.clone(),
            available: flag.clone(),
        };
        (output, log, flag)
    }

    fn worker(available: bool) -> (DirectorWorker<RecordingOutput>, PlayLog, Arc<AtomicBool>) {
        let (output, log, flag) = recorder(available);
        (DirectorWorker::new(output, Melody::default(), 1.0), log, flag)
    }

    #[test]
    fn cue_mapping() {
        let (mut worker, log, _) = worker(true);
        worker.handle(DirectorCommand::Cue(Cue::for_transition(true)), 0.0);
        worker.handle(DirectorCommand::Cue(Cue::for_transition(false)), 0.0);
        let log = log.lock().unwrap();
        assert_eq!(log[0].0, Sound::Swoosh);
        assert_eq!(log[1].0, Sound::Thud);
    }

    #[test]
    fn notes_are_delayed_to_their_slot() {
        let (mut worker, log, _) = worker(true);
        worker.handle(DirectorCommand::StartAmbient, 2.0);
        worker.wake(2.05);
        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        let (sound, delay) = log[0];
        assert!(matches!(sound, Sound::Note { frequency, .. } if frequency == 392.0));
        assert!((delay.as_secs_f64() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn stop_ends_the_loop() {
        let (mut worker, log, _) = worker(true);
        worker.handle(DirectorCommand::StartAmbient, 0.0);
        worker.wake(0.05);
        worker.handle(DirectorCommand::StopAmbient, 0.06);
        assert!(!worker.is_ambient_running());
        for i in 0..100 {
            worker.wake(0.1 + i as f64 * 0.025);
        }
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn unavailable_device_is_silent_until_it_recovers() {
        let (mut worker, log, available) = worker(false);
        worker.handle(DirectorCommand::StartAmbient, 0.0);
        worker.handle(DirectorCommand::Cue(Cue::Assemble), 0.0);
        worker.wake(1.0);
        assert!(!worker.is_ambient_running());
        assert!(log.lock().unwrap().is_empty());

        available.store(true, Ordering::SeqCst);
        worker.handle(DirectorCommand::StartAmbient, 1.0);
        assert!(worker.is_ambient_running());
        worker.wake(1.05);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn disabled_director_is_inert() {
        let settings = DirectorSettings {
            enabled: false,
            ..Default::default()
        };
        let mut director = AudioDirector::new(&settings).unwrap();
        assert!(!director.is_enabled());
        director.ambient_start();
        // The request is remembered even though nothing will sound
        assert!(director.is_ambient_requested());
        director.cue_on_assemble();
        director.on_assembled_changed(false);
        director.ambient_stop();
        director.shutdown();
    }

    #[test]
    fn threaded_director_plays_cue_and_notes() {
        let (output, log, _) = recorder(true);
        let mut director =
            AudioDirector::with_output(&DirectorSettings::default(), move || output).unwrap();
        director.cue_on_assemble();
        director.ambient_start();
        director.ambient_start();
        assert!(director.is_ambient_requested());

        std::thread::sleep(Duration::from_millis(250));
        director.shutdown();

        let log = log.lock().unwrap();
        assert_eq!(log[0].0, Sound::Swoosh);
        let notes = log
            .iter()
            .filter(|(sound, _)| matches!(sound, Sound::Note { .. }))
            .count();
        // First note is due 0.1 s after start; the next one 0.9 s later
        assert_eq!(notes, 1);
    }

    #[test]
    fn assembled_flips_reach_the_output_as_cues() {
        use crate::AudioSystem;
        use garland_runtime::{FrameContext, RuntimeSystem, TreeEvent};

        let (output, log, _) = recorder(true);
        let director =
            AudioDirector::with_output(&DirectorSettings::default(), move || output).unwrap();
        let mut system = AudioSystem::new(director);
        system.initialize().unwrap();

        for (elapsed, assembled) in [(0.016, true), (0.032, false)] {
            let events = [TreeEvent::AssembledChanged { assembled }];
            let frame = FrameContext {
                delta: 0.016,
                elapsed,
                assembled,
                events: &events,
            };
            system.update(&frame).unwrap();
        }
        // Shutdown joins the thread after it has drained every queued command
        system.shutdown().unwrap();

        let sounds: Vec<Sound> = log.lock().unwrap().iter().map(|(s, _)| *s).collect();
        assert_eq!(sounds, vec![Sound::Swoosh, Sound::Thud]);
    }

    #[test]
    fn settings_defaults() {
        let settings: DirectorSettings = toml::from_str("volume = 0.5").unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.volume, 0.5);
        assert_eq!(settings.tempo_bpm, 100.0);
    }
}
