//! Easing curves

use serde::{Deserialize, Serialize};

/// Symmetric cubic ease: accelerates through the first half, decelerates
/// through the second. Input is clamped to [0, 1].
pub fn ease_cubic_in_out(t: f32) -> f32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Easing curve applied to raw progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    CubicInOut,
}

impl Easing {
    /// Apply the curve to `t`, clamped to [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => {
                if t.is_nan() {
                    0.0
                } else {
                    t.clamp(0.0, 1.0)
                }
            }
            Easing::CubicInOut => ease_cubic_in_out(t),
        }
    }
}
