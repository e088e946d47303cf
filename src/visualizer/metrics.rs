//! Formatted metric readouts.

use serde::{Deserialize, Serialize};

use crate::config::VisualizerConfig;

/// The four strings shown next to the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsReadout {
    /// Iteration counter.
    pub iterations: String,
    /// Distance of this step's candidate, two decimals.
    pub current_score: String,
    /// Simulated elapsed time, e.g. `4.2s`.
    pub execution_time: String,
    /// CSS width of the score bar, e.g. `65.84%`.
    pub progress_width: String,
}

impl MetricsReadout {
    /// Readout after `step` frames with the given candidate score.
    #[must_use]
    pub fn for_step(step: u32, current_score: f64, config: &VisualizerConfig) -> Self {
        let elapsed = f64::from(step) * config.time_per_step_secs;
        Self {
            iterations: step.to_string(),
            current_score: format!("{current_score:.2}"),
            execution_time: format!("{elapsed:.1}s"),
            progress_width: format!("{:.2}%", progress_percent(current_score, config.score_scale)),
        }
    }

    /// Readout of a reset view.
    #[must_use]
    pub fn cleared() -> Self {
        Self {
            iterations: "0".to_string(),
            current_score: "-".to_string(),
            execution_time: "0.0s".to_string(),
            progress_width: "0%".to_string(),
        }
    }
}

impl Default for MetricsReadout {
    fn default() -> Self {
        Self::cleared()
    }
}

/// Score bar fill: `max(0, (1 − score/scale)·100)`.
#[must_use]
pub fn progress_percent(score: f64, scale: f64) -> f64 {
    if scale <= 0.0 || !score.is_finite() {
        return 0.0;
    }
    ((1.0 - score / scale) * 100.0).max(0.0)
}
