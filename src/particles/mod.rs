//! Decorative particles and the strategy-mixer slider.
//!
//! A particle is fully described by a [`ParticleSpec`] rolled from the page
//! RNG; the browser side turns it into a `div.particle` and tweens it away.

use serde::{Deserialize, Serialize};

use crate::anim::{Easing, Tween};
use crate::config::ParticleConfig;
use crate::engine::rng::GalaxyRng;

/// Randomized visual properties of one particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleSpec {
    /// Spawn position, viewport pixels.
    pub x: f64,
    pub y: f64,
    /// Edge length in pixels.
    pub size: f64,
    /// Lifetime of the fade-out animation.
    pub duration_ms: f64,
    /// HSL hue in degrees.
    pub hue: f64,
    /// Total drift over the lifetime.
    pub dx: f64,
    pub dy: f64,
}

impl ParticleSpec {
    /// Roll a particle at `(x, y)`.
    pub fn roll(rng: &mut GalaxyRng, config: &ParticleConfig, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            size: rng.gen_range_f64(config.size_min_px, config.size_max_px),
            duration_ms: rng.gen_range_f64(
                f64::from(config.duration_min_ms),
                f64::from(config.duration_max_ms),
            ),
            hue: rng.gen_range_f64(0.0, 360.0),
            dx: rng.gen_range_f64(-config.drift_px, config.drift_px),
            dy: rng.gen_range_f64(-config.drift_px, config.drift_px),
        }
    }

    /// CSS color, e.g. `hsl(212.5, 100%, 70%)`.
    #[must_use]
    pub fn color(&self) -> String {
        format!("hsl({:.1}, 100%, 70%)", self.hue)
    }

    /// CSS glow matching the color.
    #[must_use]
    pub fn box_shadow(&self) -> String {
        format!("0 0 {:.2}px {}", self.size * 2.0, self.color())
    }

    /// Fade-out tween.
    #[must_use]
    pub fn tween(&self) -> Tween {
        Tween::new(self.duration_ms, Easing::EaseOutExpo)
    }

    /// Inline style for the frame at eased progress `p`: drifted, faded, shrunk.
    #[must_use]
    pub fn frame_style(&self, p: f64) -> ParticleFrame {
        ParticleFrame {
            translate_x: self.dx * p,
            translate_y: self.dy * p,
            opacity: 1.0 - p,
            scale: 1.0 - p,
        }
    }
}

/// Animated properties of a particle on one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub translate_x: f64,
    pub translate_y: f64,
    pub opacity: f64,
    pub scale: f64,
}

impl ParticleFrame {
    /// CSS `transform` value.
    #[must_use]
    pub fn transform(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) scale({:.3})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Rolls whether an ambient tick spawns, and where.
#[derive(Debug, Clone)]
pub struct AmbientSpawner {
    probability: f64,
}

impl AmbientSpawner {
    /// Spawner firing with the configured probability per tick.
    #[must_use]
    pub fn new(config: &ParticleConfig) -> Self {
        Self {
            probability: config.ambient_probability,
        }
    }

    /// One timer tick: a spawn position inside `width × height`, or nothing.
    pub fn tick(&self, rng: &mut GalaxyRng, width: f64, height: f64) -> Option<(f64, f64)> {
        if !rng.gen_bool(self.probability) {
            return None;
        }
        Some((
            rng.gen_range_f64(0.0, width.max(0.0)),
            rng.gen_range_f64(0.0, height.max(0.0)),
        ))
    }
}

/// Greedy/DP weighting chosen on the hybrid slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HybridMix {
    /// Greedy share in percent.
    pub greedy_pct: u32,
    /// Dynamic-programming share in percent.
    pub dp_pct: u32,
}

impl HybridMix {
    /// Mix for a slider value in `[0, 100]`; out-of-range values are clamped.
    #[must_use]
    pub fn from_slider(value: f64) -> Self {
        let greedy = if value.is_finite() {
            value.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let greedy_pct = greedy.round() as u32;
        Self {
            greedy_pct,
            dp_pct: 100 - greedy_pct,
        }
    }

    /// Slider caption.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Greedy {}% ←→ DP {}%", self.greedy_pct, self.dp_pct)
    }
}

/// Thumb position of a horizontal slider, where burst particles spawn.
#[must_use]
pub fn slider_thumb(left: f64, top: f64, width: f64, value: f64) -> (f64, f64) {
    (left + (value / 100.0) * width, top)
}


#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Rolled properties stay inside the configured ranges.
        #[test]
        fn prop_spec_in_ranges(seed in 0u64..u64::MAX, x in -1e4f64..1e4, y in -1e4f64..1e4) {
            let config = ParticleConfig::default();
            let mut rng = GalaxyRng::new(seed);
            let spec = ParticleSpec::roll(&mut rng, &config, x, y);
            prop_assert_eq!(spec.x, x);
            prop_assert!((1.0..4.0).contains(&spec.size));
            prop_assert!((2000.0..5000.0).contains(&spec.duration_ms));
            prop_assert!((0.0..360.0).contains(&spec.hue));
            prop_assert!((-100.0..100.0).contains(&spec.dx));
            prop_assert!((-100.0..100.0).contains(&spec.dy));
        }

        /// The two shares always add up to 100.
        #[test]
        fn prop_mix_sums_to_100(value in -50.0f64..150.0) {
            let mix = HybridMix::from_slider(value);
            prop_assert_eq!(mix.greedy_pct + mix.dp_pct, 100);
        }
    }
}
