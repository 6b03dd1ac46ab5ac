//! Offline synthesis of the music box notes and transition cues
//!
//! Everything renders to mono `f32` buffers which the engine wraps as static
//! sounds. Envelopes follow "linear to peak, then exponential to floor".

use rand::Rng;
use std::f64::consts::TAU;

pub const SAMPLE_RATE: u32 = 44_100;

const NOTE_ATTACK: f64 = 0.02;
const NOTE_PEAK: f64 = 0.25;
const HARMONIC_PEAK: f64 = 0.05;
const ENVELOPE_FLOOR: f64 = 0.001;

const THUD_LENGTH: f64 = 0.8;
const THUD_SWEEP: f64 = 0.3;
const THUD_CUTOFF: f64 = 300.0;

const SWOOSH_LENGTH: f64 = 1.2;
const SWOOSH_Q: f64 = 0.5;
const SWOOSH_PEAK: f64 = 0.4;

/// Exponential interpolation from `from` to `to` over `length` seconds
fn exp_ramp(from: f64, to: f64, t: f64, length: f64) -> f64 {
    if length <= 0.0 {
        return to;
    }
    let x = (t / length).clamp(0.0, 1.0);
    from * (to / from).powf(x)
}

/// Linear attack to `peak`, then exponential decay to the floor by `end`
fn pluck_envelope(t: f64, peak: f64, end: f64) -> f64 {
    if t < NOTE_ATTACK {
        peak * t / NOTE_ATTACK
    } else if t < end {
        exp_ramp(peak, ENVELOPE_FLOOR, t - NOTE_ATTACK, end - NOTE_ATTACK)
    } else {
        ENVELOPE_FLOOR
    }
}

fn sample_count(seconds: f64, sample_rate: u32) -> usize {
    (seconds * sample_rate as f64).ceil().max(0.0) as usize
}

/// A plucked tine: fundamental plus a quieter octave.
///
/// The buffer rings for `duration * 1.5` seconds, past the note's nominal
/// length, so consecutive notes overlap slightly.
pub fn music_box_note(frequency: f32, duration: f64, sample_rate: u32) -> Vec<f32> {
    let frequency = frequency as f64;
    let decay = duration * 1.5;
    let harmonic_decay = decay * 0.8;
    let rate = sample_rate as f64;

    (0..sample_count(decay, sample_rate))
        .map(|i| {
            let t = i as f64 / rate;
            let fundamental = pluck_envelope(t, NOTE_PEAK, decay) * (TAU * frequency * t).sin();
            let octave = pluck_envelope(t, HARMONIC_PEAK, harmonic_decay)
                * (TAU * 2.0 * frequency * t).sin();
            (fundamental + octave) as f32
        })
        .collect()
}

/// Triangle wave in [-1, 1], zero at phase 0
fn triangle(phase: f64) -> f64 {
    1.0 - 4.0 * ((phase + 0.25).fract() - 0.5).abs()
}

/// Low "thud": a falling triangle through a low-pass
pub fn thud(sample_rate: u32) -> Vec<f32> {
    let rate = sample_rate as f64;
    let smoothing = 1.0 - (-TAU * THUD_CUTOFF / rate).exp();
    let mut phase = 0.0_f64;
    let mut filtered = 0.0_f64;

    (0..sample_count(THUD_LENGTH, sample_rate))
        .map(|i| {
            let t = i as f64 / rate;
            let frequency = exp_ramp(120.0, 40.0, t, THUD_SWEEP);
            let raw = triangle(phase);
            phase = (phase + frequency / rate).fract();

            filtered += smoothing * (raw - filtered);
            let gain = exp_ramp(1.5, 0.01, t, THUD_LENGTH);
            (filtered * gain) as f32
        })
        .collect()
}

/// Band-pass biquad (constant 0 dB peak gain) with per-sample retuning
#[derive(Debug, Default)]
struct BandPass {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BandPass {
    fn process(&mut self, input: f64, center: f64, q: f64, rate: f64) -> f64 {
        let w0 = TAU * center / rate;
        let alpha = w0.sin() / (2.0 * q);
        let a0 = 1.0 + alpha;
        let b0 = alpha / a0;
        let b2 = -alpha / a0;
        let a1 = -2.0 * w0.cos() / a0;
        let a2 = (1.0 - alpha) / a0;

        let output = b0 * input + b2 * self.x2 - a1 * self.y1 - a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;
        output
    }
}

/// Centre frequency of the swoosh sweep at `t`
fn swoosh_center(t: f64) -> f64 {
    let rise = SWOOSH_LENGTH * 0.8;
    if t < rise {
        exp_ramp(100.0, 1500.0, t, rise)
    } else {
        exp_ramp(1500.0, 400.0, t - rise, SWOOSH_LENGTH - rise)
    }
}

fn swoosh_gain(t: f64) -> f64 {
    let fade_in = SWOOSH_LENGTH * 0.2;
    if t < fade_in {
        SWOOSH_PEAK * t / fade_in
    } else {
        (SWOOSH_PEAK * (1.0 - (t - fade_in) / (SWOOSH_LENGTH - fade_in))).max(0.0)
    }
}

/// Airy "swoosh": white noise through a sweeping band-pass
pub fn swoosh<R: Rng + ?Sized>(rng: &mut R, sample_rate: u32) -> Vec<f32> {
    let rate = sample_rate as f64;
    let mut filter = BandPass::default();

    (0..sample_count(SWOOSH_LENGTH, sample_rate))
        .map(|i| {
            let t = i as f64 / rate;
            let noise = rng.random::<f64>() * 2.0 - 1.0;
            let band = filter.process(noise, swoosh_center(t), SWOOSH_Q, rate);
            (band * swoosh_gain(t)) as f32
        })
        .collect()
}

/// Largest absolute sample value
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |max, s| max.max(s.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn window(samples: &[f32], from: f64, to: f64) -> &[f32] {
        let rate = SAMPLE_RATE as f64;
        let start = (from * rate) as usize;
        let end = ((to * rate) as usize).min(samples.len());
        &samples[start..end]
    }

    #[test]
    fn note_rings_for_one_and_a_half_durations() {
        let samples = music_box_note(440.0, 0.6, SAMPLE_RATE);
        assert_eq!(samples.len(), sample_count(0.9, SAMPLE_RATE));
        assert_eq!(samples[0], 0.0);
    }

    #[test]
    fn note_peaks_after_attack_and_fades() {
        let samples = music_box_note(392.0, 0.6, SAMPLE_RATE);
        let head = peak(window(&samples, 0.0, 0.05));
        assert!(head > 0.2 && head <= 0.3 + 1e-4, "head peak {head}");
        let tail = peak(window(&samples, 0.85, 0.9));
        assert!(tail < 0.01, "tail peak {tail}");
    }

    #[test]
    fn pluck_envelope_shape() {
        assert_eq!(pluck_envelope(0.0, 0.25, 1.0), 0.0);
        assert!((pluck_envelope(NOTE_ATTACK, 0.25, 1.0) - 0.25).abs() < 1e-9);
        assert!((pluck_envelope(1.0, 0.25, 1.0) - ENVELOPE_FLOOR).abs() < 1e-9);
        assert_eq!(pluck_envelope(2.0, 0.25, 1.0), ENVELOPE_FLOOR);
    }

    #[test]
    fn thud_is_loud_then_quiet() {
        let samples = thud(SAMPLE_RATE);
        assert_eq!(samples.len(), sample_count(THUD_LENGTH, SAMPLE_RATE));
        assert!(samples.iter().all(|s| s.is_finite()));
        let head = peak(window(&samples, 0.0, 0.2));
        let tail = peak(window(&samples, 0.7, 0.8));
        assert!(head > 0.1);
        assert!(tail < head * 0.1);
    }

    #[test]
    fn thud_pitch_falls_to_forty_hertz() {
        assert!((exp_ramp(120.0, 40.0, 0.0, THUD_SWEEP) - 120.0).abs() < 1e-9);
        assert!((exp_ramp(120.0, 40.0, 0.3, THUD_SWEEP) - 40.0).abs() < 1e-9);
        assert!((exp_ramp(120.0, 40.0, 0.6, THUD_SWEEP) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn swoosh_fades_in_and_out() {
        let mut rng = StdRng::seed_from_u64(3);
        let samples = swoosh(&mut rng, SAMPLE_RATE);
        assert_eq!(samples.len(), sample_count(SWOOSH_LENGTH, SAMPLE_RATE));
        assert!(samples.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
        assert_eq!(samples[0], 0.0);
        let body = peak(window(&samples, 0.3, 0.9));
        let end = peak(window(&samples, 1.19, 1.2));
        assert!(body > end);
    }

    #[test]
    fn swoosh_sweep_points() {
        assert!((swoosh_center(0.0) - 100.0).abs() < 1e-9);
        assert!((swoosh_center(0.96) - 1500.0).abs() < 1e-6);
        assert!((swoosh_center(1.2) - 400.0).abs() < 1e-6);
        assert_eq!(swoosh_gain(0.0), 0.0);
        assert!((swoosh_gain(0.24) - 0.4).abs() < 1e-9);
        assert!(swoosh_gain(1.2).abs() < 1e-9);
    }

    #[test]
    fn triangle_range() {
        assert!(triangle(0.0).abs() < 1e-12);
        assert!((triangle(0.25) - 1.0).abs() < 1e-12);
        assert!((triangle(0.75) + 1.0).abs() < 1e-12);
    }
}
