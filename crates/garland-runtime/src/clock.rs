//! Frame clock

use std::time::Instant;

/// Longest frame delta accepted; anything slower is treated as this long
pub const MAX_FRAME_DELTA: f64 = 0.25;

/// Tracks per-frame delta and total elapsed time.
///
/// Wall-clock hosts call `tick()` once per frame; deterministic hosts (tests,
/// headless simulation) feed their own deltas through `advance()`.
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Frames advanced so far
    pub frame_count: u64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame_count: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance from the wall clock. Call once per frame.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.advance(0.0);
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed);
    }

    /// Advance by an explicit delta, clamped to [0, `MAX_FRAME_DELTA`]
    pub fn advance(&mut self, delta: f64) {
        let delta = if delta.is_finite() { delta } else { 0.0 };
        self.delta_time = delta.clamp(0.0, MAX_FRAME_DELTA);
        self.total_time += self.delta_time;
        self.frame_count += 1;
    }

    pub fn delta_f32(&self) -> f32 {
        self.delta_time as f32
    }

    pub fn elapsed_f32(&self) -> f32 {
        self.total_time as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = FrameClock::new();
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.frame_count, 0);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = FrameClock::new();
        clock.tick();
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.frame_count, 1);
    }

    #[test]
    fn test_advance_accumulates() {
        let mut clock = FrameClock::new();
        clock.advance(0.1);
        clock.advance(0.2);
        assert!((clock.total_time - 0.3).abs() < 1e-12);
        assert!((clock.delta_time - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_long_frames_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(3.0);
        assert_eq!(clock.delta_time, MAX_FRAME_DELTA);
        clock.advance(-1.0);
        assert_eq!(clock.delta_time, 0.0);
        clock.advance(f64::NAN);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.total_time, MAX_FRAME_DELTA);
    }
}
