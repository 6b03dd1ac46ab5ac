//! Lookahead note scheduling for the music box

use crate::melody::Melody;
use serde::Serialize;
use std::time::Duration;

/// How far ahead of the current time notes are handed to the engine
pub const LOOKAHEAD: f64 = 0.1;
/// Delay before the first note after `start`
pub const START_DELAY: f64 = 0.1;
/// How often the audio thread wakes to poll the scheduler
pub const WAKE_INTERVAL: Duration = Duration::from_millis(25);
/// If the scheduler falls further behind than this, it skips ahead instead
/// of playing every missed note at once
pub const MAX_CATCH_UP: f64 = 1.0;
/// Upper bound on notes released by a single poll
pub const MAX_NOTES_PER_POLL: usize = 64;

/// A note with an absolute start time on the scheduler's clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduledNote {
    pub frequency: f32,
    /// Seconds, same clock as the `now` passed to `poll`
    pub time: f64,
    /// Nominal length in seconds; the synthesized tail rings longer
    pub duration: f64,
}

/// Result of one scheduler wake
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchedulerPoll {
    pub notes: Vec<ScheduledNote>,
    /// When the scheduler wants to be polled again, `None` when stopped
    pub next_wake: Option<f64>,
}

/// Walks the melody in a loop, releasing notes slightly before they are due.
///
/// `next_note_time` only moves forward, so irregular wake-ups neither drop
/// nor repeat notes. The one exception is a stall longer than `MAX_CATCH_UP`:
/// the missed notes are skipped and counted rather than played in a burst.
#[derive(Debug, Clone)]
pub struct LookaheadScheduler {
    melody: Melody,
    next_note_time: f64,
    note_index: usize,
    running: bool,
    /// Notes skipped by catch-up resyncs since construction
    dropped: u64,
}

impl LookaheadScheduler {
    pub fn new(melody: Melody) -> Self {
        Self {
            melody,
            next_note_time: 0.0,
            note_index: 0,
            running: false,
            dropped: 0,
        }
    }

    /// Begin playback from the top of the melody. No-op while running.
    pub fn start(&mut self, now: f64) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.note_index = 0;
        self.next_note_time = now + START_DELAY;
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn melody(&self) -> &Melody {
        &self.melody
    }

    pub fn next_note_time(&self) -> f64 {
        self.next_note_time
    }

    /// Notes skipped after stalls longer than `MAX_CATCH_UP`
    pub fn dropped_notes(&self) -> u64 {
        self.dropped
    }

    /// Release every note due before `now + LOOKAHEAD`, at most
    /// `MAX_NOTES_PER_POLL` of them. Anything left over goes out on the next
    /// poll.
    pub fn poll(&mut self, now: f64) -> SchedulerPoll {
        if !self.running {
            return SchedulerPoll::default();
        }

        let behind = now - self.next_note_time;
        if behind > MAX_CATCH_UP {
            let skipped = self.estimate_missed(behind);
            self.dropped += skipped;
            log::warn!("Music box fell {behind:.2}s behind, dropped about {skipped} notes");
            self.next_note_time = now;
        }

        let seconds_per_beat = self.melody.seconds_per_beat();
        let mut notes = Vec::new();
        let mut steps = 0;

        while self.next_note_time < now + LOOKAHEAD && steps < MAX_NOTES_PER_POLL {
            steps += 1;
            let note = self.melody.notes()[self.note_index];
            let duration = note.beats as f64 * seconds_per_beat;

            // A note too short to move the clock would pin the loop in place
            if self.next_note_time + duration <= self.next_note_time {
                log::warn!(
                    "Music box note of {} beats is too short to schedule, stopping",
                    note.beats
                );
                self.running = false;
                break;
            }

            if !note.is_rest() {
                notes.push(ScheduledNote {
                    frequency: note.frequency,
                    time: self.next_note_time,
                    duration,
                });
            }

            self.next_note_time += duration;
            self.note_index = (self.note_index + 1) % self.melody.len();
        }

        SchedulerPoll {
            notes,
            next_wake: self.running.then(|| now + WAKE_INTERVAL.as_secs_f64()),
        }
    }

    /// Audible notes that would have started within `behind` seconds
    fn estimate_missed(&self, behind: f64) -> u64 {
        let per_loop = self.melody.notes().iter().filter(|n| !n.is_rest()).count();
        let loops = behind / self.melody.loop_duration();
        (loops * per_loop as f64).round() as u64
    }
}

impl Default for LookaheadScheduler {
    fn default() -> Self {
        Self::new(Melody::default())
    }
}
