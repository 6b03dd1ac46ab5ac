//! The music box tune

use garland_core::{GarlandError, Result};
use serde::Serialize;

/// Default playback tempo
pub const DEFAULT_TEMPO_BPM: f32 = 100.0;
/// Slowest accepted tempo
pub const MIN_TEMPO_BPM: f32 = 20.0;
/// Fastest accepted tempo
pub const MAX_TEMPO_BPM: f32 = 1000.0;

/// One melody step. A frequency of 0 is a rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Note {
    pub frequency: f32,
    pub beats: f32,
}

impl Note {
    pub const fn new(frequency: f32, beats: f32) -> Self {
        Self { frequency, beats }
    }

    pub fn is_rest(&self) -> bool {
        self.frequency <= 0.0
    }
}

const fn n(frequency: f32, beats: f32) -> Note {
    Note::new(frequency, beats)
}

/// "Silent Night", from "sleep in heavenly peace", ending on a two-beat rest
/// before it loops.
#[rustfmt::skip]
pub const SILENT_NIGHT: &[Note] = &[
    n(392.00, 1.5), n(440.00, 0.5), n(392.00, 1.0), n(329.63, 3.0),
    n(392.00, 1.5), n(440.00, 0.5), n(392.00, 1.0), n(329.63, 3.0),
    n(587.33, 2.0), n(587.33, 1.0), n(493.88, 3.0),
    n(523.25, 2.0), n(523.25, 1.0), n(392.00, 3.0),
    n(440.00, 2.0), n(440.00, 1.0), n(523.25, 1.5), n(493.88, 0.5), n(440.00, 1.0),
    n(392.00, 1.5), n(440.00, 0.5), n(392.00, 1.0), n(329.63, 3.0),
    n(587.33, 2.0), n(587.33, 1.0), n(659.25, 1.5), n(587.33, 0.5), n(523.25, 1.0),
    n(523.25, 3.0), n(659.25, 3.0),
    n(523.25, 1.5), n(392.00, 0.5), n(329.63, 1.0), n(392.00, 3.0),
    n(0.0, 2.0),
];

/// A looping note sequence at a fixed tempo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Melody {
    notes: Vec<Note>,
    tempo_bpm: f32,
}

impl Melody {
    /// Every note must last a positive, finite number of beats and the tempo
    /// must lie in [`MIN_TEMPO_BPM`, `MAX_TEMPO_BPM`].
    pub fn new(notes: Vec<Note>, tempo_bpm: f32) -> Result<Self> {
        if notes.is_empty() {
            return Err(GarlandError::AudioError("melody has no notes".into()));
        }
        if !(MIN_TEMPO_BPM..=MAX_TEMPO_BPM).contains(&tempo_bpm) {
            return Err(GarlandError::AudioError(format!(
                "tempo {tempo_bpm} BPM outside {MIN_TEMPO_BPM}..={MAX_TEMPO_BPM}"
            )));
        }
        if let Some(bad) = notes
            .iter()
            .find(|note| !(note.beats.is_finite() && note.beats > 0.0))
        {
            return Err(GarlandError::AudioError(format!(
                "note {} Hz has invalid length {} beats",
                bad.frequency, bad.beats
            )));
        }
        Ok(Self { notes, tempo_bpm })
    }

    pub fn silent_night(tempo_bpm: f32) -> Result<Self> {
        Self::new(SILENT_NIGHT.to_vec(), tempo_bpm)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn tempo_bpm(&self) -> f32 {
        self.tempo_bpm
    }

    pub fn seconds_per_beat(&self) -> f64 {
        60.0 / self.tempo_bpm as f64
    }

    /// Length of one pass through the melody, in seconds
    pub fn loop_duration(&self) -> f64 {
        let beats: f64 = self.notes.iter().map(|note| note.beats as f64).sum();
        beats * self.seconds_per_beat()
    }
}

impl Default for Melody {
    fn default() -> Self {
        Self {
            notes: SILENT_NIGHT.to_vec(),
            tempo_bpm: DEFAULT_TEMPO_BPM,
        }
    }
}
