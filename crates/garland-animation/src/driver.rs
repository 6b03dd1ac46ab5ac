//! Assembly progress state and the per-frame driver

use crate::easing::Easing;
use serde::Serialize;
use std::fmt;

/// Progress units per second. At 2.0 a full transition takes half a second.
pub const ANIMATION_SPEED: f32 = 2.0;

/// Where the tree is in its scattered ⇄ assembled cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyPhase {
    Scattered,
    Assembling,
    Assembled,
    Scattering,
}

impl fmt::Display for AssemblyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssemblyPhase::Scattered => "scattered",
            AssemblyPhase::Assembling => "assembling",
            AssemblyPhase::Assembled => "assembled",
            AssemblyPhase::Scattering => "scattering",
        };
        f.write_str(name)
    }
}

/// Raw transition progress as a plain value.
///
/// `advance` returns the next state instead of mutating in place, so a frame
/// update can be tested without a renderer. The value never leaves [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AssemblyProgress {
    value: f32,
    /// Direction of the most recent advance
    assembling: bool,
}

impl AssemblyProgress {
    /// Fully scattered, at rest
    pub const SCATTERED: Self = Self {
        value: 0.0,
        assembling: false,
    };

    /// Progress at `value` (clamped), last heading toward `assembling`
    pub fn at(value: f32, assembling: bool) -> Self {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        Self { value, assembling }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Move toward 1 (assembled) or 0 (scattered) by at most `delta * speed`.
    ///
    /// Lands exactly on the target instead of overshooting. Negative or
    /// non-finite deltas and speeds count as zero.
    pub fn advance(self, assembled: bool, delta: f32, speed: f32) -> Self {
        let target = if assembled { 1.0 } else { 0.0 };
        let step = non_negative(delta) * non_negative(speed);

        let value = if self.value < target {
            (self.value + step).min(target)
        } else {
            (self.value - step).max(target)
        };

        Self {
            value: value.clamp(0.0, 1.0),
            assembling: assembled,
        }
    }

    pub fn eased(&self, easing: Easing) -> f32 {
        easing.apply(self.value)
    }

    pub fn phase(&self) -> AssemblyPhase {
        match (self.assembling, self.value) {
            (true, v) if v >= 1.0 => AssemblyPhase::Assembled,
            (true, _) => AssemblyPhase::Assembling,
            (false, v) if v <= 0.0 => AssemblyPhase::Scattered,
            (false, _) => AssemblyPhase::Scattering,
        }
    }

    /// At rest on either end
    pub fn is_settled(&self) -> bool {
        matches!(
            self.phase(),
            AssemblyPhase::Scattered | AssemblyPhase::Assembled
        )
    }
}

fn non_negative(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

/// Per-frame driver owning the tree's single progress value.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    progress: AssemblyProgress,
    pub speed: f32,
    pub easing: Easing,
}

impl AnimationDriver {
    pub fn new(speed: f32) -> Self {
        Self {
            progress: AssemblyProgress::SCATTERED,
            speed,
            easing: Easing::CubicInOut,
        }
    }

    /// Start from an arbitrary progress value (e.g. restoring mid-transition)
    pub fn with_progress(mut self, progress: AssemblyProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Advance one frame and return the eased blend factor in [0, 1]
    pub fn tick(&mut self, assembled: bool, delta: f32) -> f32 {
        let before = self.progress.phase();
        self.progress = self.progress.advance(assembled, delta, self.speed);
        let after = self.progress.phase();
        if before != after {
            log::debug!("Tree {before} -> {after}");
        }
        self.eased()
    }

    pub fn progress(&self) -> AssemblyProgress {
        self.progress
    }

    pub fn eased(&self) -> f32 {
        self.progress.eased(self.easing)
    }

    pub fn phase(&self) -> AssemblyPhase {
        self.progress.phase()
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(ANIMATION_SPEED)
    }
}
