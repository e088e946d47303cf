//! Easing curves and time-based tweens.
//!
//! Every animated property on the page (toast slide, particle fade, progress
//! bar, modal scale, galaxy pulse) is a [`Tween`] sampled once per animation
//! frame. The curves are the usual Penner set; all of them satisfy
//! `f(0) = 0` and `f(1) = 1`.
//!
//! ```text
//! easeOutQuad:  1 − (1 − t)²
//! easeOutExpo:  1 − 2^(−10t)
//! easeInExpo:   2^(10t − 10)
//! easeOutBack:  1 + c₃(t − 1)³ + c₁(t − 1)²      c₁ = 1.70158, c₃ = c₁ + 1
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const BACK_C1: f64 = 1.701_58;
const BACK_C3: f64 = BACK_C1 + 1.0;

/// Easing curve mapping linear progress to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseOutQuad,
    EaseOutExpo,
    EaseInExpo,
    EaseInOutSine,
    EaseOutBack,
    EaseInBack,
}

impl Easing {
    /// Eased value at linear progress `t` (clamped to [0, 1]).
    ///
    /// Back curves overshoot outside [0, 1] between the endpoints.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2_f64.powf(-10.0 * t)
                }
            }
            Self::EaseInExpo => {
                if t <= 0.0 {
                    0.0
                } else {
                    2_f64.powf(10.0 * t - 10.0)
                }
            }
            Self::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Self::EaseOutBack => {
                let u = t - 1.0;
                1.0 + BACK_C3 * u * u * u + BACK_C1 * u * u
            }
            Self::EaseInBack => BACK_C3 * t * t * t - BACK_C1 * t * t,
        }
    }
}

/// Linear interpolation between `from` and `to`.
#[must_use]
pub fn lerp(from: f64, to: f64, progress: f64) -> f64 {
    from + (to - from) * progress
}

/// How a tween behaves after its duration elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Repeat {
    /// Play once and stop at the end value.
    #[default]
    Once,
    /// Loop forever, reversing direction every cycle.
    Alternate,
}

/// A time-based animation of one or more numeric ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    /// Length of one cycle.
    pub duration_ms: f64,
    /// Time before the first cycle starts.
    pub delay_ms: f64,
    /// Curve applied to each cycle.
    pub easing: Easing,
    /// End-of-cycle behavior.
    pub repeat: Repeat,
}

impl Tween {
    /// One-shot tween.
    #[must_use]
    pub const fn new(duration_ms: f64, easing: Easing) -> Self {
        Self {
            duration_ms,
            delay_ms: 0.0,
            easing,
            repeat: Repeat::Once,
        }
    }

    /// Delay the start.
    #[must_use]
    pub const fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Loop forever, alternating direction.
    #[must_use]
    pub const fn alternate(mut self) -> Self {
        self.repeat = Repeat::Alternate;
        self
    }

    /// Linear (un-eased) progress of the current cycle in [0, 1].
    #[must_use]
    pub fn linear_progress(&self, elapsed_ms: f64) -> f64 {
        let t = elapsed_ms - self.delay_ms;
        if t <= 0.0 {
            return 0.0;
        }
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        match self.repeat {
            Repeat::Once => (t / self.duration_ms).min(1.0),
            Repeat::Alternate => {
                let cycles = t / self.duration_ms;
                let phase = cycles.fract();
                if (cycles.floor() as u64) % 2 == 0 {
                    phase
                } else {
                    1.0 - phase
                }
            }
        }
    }

    /// Eased progress at `elapsed_ms`.
    #[must_use]
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        self.easing.apply(self.linear_progress(elapsed_ms))
    }

    /// Value of `from → to` at `elapsed_ms`.
    #[must_use]
    pub fn value(&self, from: f64, to: f64, elapsed_ms: f64) -> f64 {
        lerp(from, to, self.progress(elapsed_ms))
    }

    /// Whether a one-shot tween has reached its end. Looping tweens never do.
    #[must_use]
    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        self.repeat == Repeat::Once && elapsed_ms >= self.delay_ms + self.duration_ms.max(0.0)
    }
}
