//! Page configuration with YAML schema and validation.
//!
//! Every tunable the page uses (iteration budget, toast timing, particle
//! ranges, upload allow-list, DOM hooks) lives here. Defaults reproduce the
//! stock page; the embedded `assets/galaxy.yaml` spells them out so a host
//! can copy it, edit it and pass it to `GalaxyApp.mountWithConfig`.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{GalaxyError, GalaxyResult};

/// Stock configuration shipped with the crate.
pub const EMBEDDED_CONFIG_YAML: &str = include_str!("../../assets/galaxy.yaml");

/// Top-level page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GalaxyConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Step visualizer settings.
    #[validate(nested)]
    #[serde(default)]
    pub visualizer: VisualizerConfig,

    /// Toast timing.
    #[validate(nested)]
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Particle emitter settings.
    #[validate(nested)]
    #[serde(default)]
    pub particles: ParticleConfig,

    /// Upload flow settings.
    #[validate(nested)]
    #[serde(default)]
    pub upload: UploadConfig,

    /// Backend endpoints.
    #[validate(nested)]
    #[serde(default)]
    pub api: ApiConfig,

    /// DOM hooks shared with the host page template.
    #[serde(default)]
    pub dom: DomIds,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl GalaxyConfig {
    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, schema validation or semantic validation fails.
    pub fn from_yaml(yaml: &str) -> GalaxyResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Load the configuration embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns error if the embedded YAML is invalid.
    pub fn embedded() -> GalaxyResult<Self> {
        Self::from_yaml(EMBEDDED_CONFIG_YAML)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> GalaxyConfigBuilder {
        GalaxyConfigBuilder::default()
    }

    /// Validate constraints the schema cannot express.
    fn validate_semantic(&self) -> GalaxyResult<()> {
        if self.upload.allowed_extensions.is_empty() {
            return Err(GalaxyError::config("upload.allowed_extensions must not be empty"));
        }
        if let Some(bad) = self
            .upload
            .allowed_extensions
            .iter()
            .find(|ext| !ext.starts_with('.') || ext.len() < 2)
        {
            return Err(GalaxyError::config(format!(
                "upload extension '{bad}' must look like '.ext'"
            )));
        }

        let p = &self.particles;
        if p.size_min_px > p.size_max_px {
            return Err(GalaxyError::config("particles.size_min_px exceeds size_max_px"));
        }
        if p.duration_min_ms > p.duration_max_ms {
            return Err(GalaxyError::config(
                "particles.duration_min_ms exceeds duration_max_ms",
            ));
        }

        Ok(())
    }
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            visualizer: VisualizerConfig::default(),
            notifications: NotificationConfig::default(),
            particles: ParticleConfig::default(),
            upload: UploadConfig::default(),
            api: ApiConfig::default(),
            dom: DomIds::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct GalaxyConfigBuilder {
    seed: Option<u64>,
    city_count: Option<usize>,
    max_steps: Option<u32>,
    ambient_probability: Option<f64>,
}

impl GalaxyConfigBuilder {
    /// Pin the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of cities per run.
    #[must_use]
    pub const fn city_count(mut self, n: usize) -> Self {
        self.city_count = Some(n);
        self
    }

    /// Set the iteration budget per run.
    #[must_use]
    pub const fn max_steps(mut self, steps: u32) -> Self {
        self.max_steps = Some(steps);
        self
    }

    /// Set the ambient particle spawn probability per tick.
    #[must_use]
    pub const fn ambient_probability(mut self, p: f64) -> Self {
        self.ambient_probability = Some(p);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> GalaxyConfig {
        let mut config = GalaxyConfig::default();

        if let Some(seed) = self.seed {
            config.visualizer.seed = Some(seed);
        }
        if let Some(n) = self.city_count {
            config.visualizer.city_count = n;
        }
        if let Some(steps) = self.max_steps {
            config.visualizer.max_steps = steps;
        }
        if let Some(p) = self.ambient_probability {
            config.particles.ambient_probability = p;
        }

        config
    }
}

/// Step visualizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VisualizerConfig {
    /// Cities generated per run.
    #[validate(range(min = 2, max = 500))]
    #[serde(default = "default_city_count")]
    pub city_count: usize,
    /// Frames per run before the loop finalizes.
    #[validate(range(min = 1, max = 100_000))]
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
    /// Fixed seed; random per page load when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Simulated seconds added to the elapsed readout per step.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_time_per_step")]
    pub time_per_step_secs: f64,
    /// Score at which the progress bar reads 0%.
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default = "default_score_scale")]
    pub score_scale: f64,
}

const fn default_city_count() -> usize {
    15
}

const fn default_max_steps() -> u32 {
    100
}

const fn default_time_per_step() -> f64 {
    0.1
}

const fn default_score_scale() -> f64 {
    1000.0
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            city_count: default_city_count(),
            max_steps: default_max_steps(),
            seed: None,
            time_per_step_secs: default_time_per_step(),
            score_scale: default_score_scale(),
        }
    }
}

/// Toast timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationConfig {
    /// Delay before a toast starts leaving.
    #[validate(range(min = 1))]
    pub dismiss_after_ms: u32,
    /// Slide-in duration.
    pub enter_ms: u32,
    /// Slide-out duration.
    pub exit_ms: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: 3000,
            enter_ms: 500,
            exit_ms: 500,
        }
    }
}

/// Particle emitter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleConfig {
    /// Smallest particle edge in pixels.
    #[validate(range(exclusive_min = 0.0))]
    pub size_min_px: f64,
    /// Largest particle edge in pixels (exclusive).
    pub size_max_px: f64,
    /// Shortest animation.
    pub duration_min_ms: u32,
    /// Longest animation (exclusive).
    pub duration_max_ms: u32,
    /// Maximum drift along each axis in pixels.
    #[validate(range(min = 0.0))]
    pub drift_px: f64,
    /// Ambient spawner tick.
    #[validate(range(min = 1))]
    pub ambient_interval_ms: u32,
    /// Chance an ambient tick spawns a particle.
    #[validate(range(min = 0.0, max = 1.0))]
    pub ambient_probability: f64,
    /// Particles per slider interaction.
    pub burst_count: u32,
    /// Delay between burst particles.
    pub burst_spacing_ms: u32,
    /// Particles sprinkled on mount.
    pub initial_count: u32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            size_min_px: 1.0,
            size_max_px: 4.0,
            duration_min_ms: 2000,
            duration_max_ms: 5000,
            drift_px: 100.0,
            ambient_interval_ms: 100,
            ambient_probability: 0.3,
            burst_count: 5,
            burst_spacing_ms: 100,
            initial_count: 50,
        }
    }
}

/// Upload flow settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct UploadConfig {
    /// Accepted file extensions, dot included, case-insensitive.
    pub allowed_extensions: Vec<String>,
    /// Duration of the simulated progress bar.
    #[validate(range(min = 1))]
    pub progress_ms: u32,
    /// Delay between the success toast and closing the modal.
    pub close_delay_ms: u32,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: vec![".tsp".into(), ".csv".into(), ".json".into()],
            progress_ms: 2000,
            close_delay_ms: 1000,
        }
    }
}

/// Backend endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Run history listing.
    #[validate(length(min = 1))]
    pub history_endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            history_endpoint: "/api/history".to_string(),
        }
    }
}

/// Element IDs and selectors the page template provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DomIds {
    pub particles_container: String,
    pub problem_canvas: String,
    pub upload_modal: String,
    pub hybrid_slider: String,
    pub drop_zone: String,
    pub file_input: String,
    pub upload_button: String,
    pub file_name_display: String,
    pub run_button: String,
    pub pause_button: String,
    pub reset_button: String,
    pub history_button: String,
    pub iterations: String,
    pub current_score: String,
    pub execution_time: String,
    pub score_progress: String,
    pub total_runs: String,
    pub best_score: String,
    /// Selector matching the selected strategy cards.
    pub selected_strategy: String,
    /// Selector of the slider caption.
    pub slider_label: String,
    /// Selector of the modal body inside `upload_modal`.
    pub modal_content: String,
    pub hub_core: String,
    pub planet: String,
}

impl Default for DomIds {
    fn default() -> Self {
        Self {
            particles_container: "particles-container".into(),
            problem_canvas: "problem-canvas".into(),
            upload_modal: "upload-modal".into(),
            hybrid_slider: "hybrid-slider".into(),
            drop_zone: "drop-zone".into(),
            file_input: "file-input".into(),
            upload_button: "upload-button".into(),
            file_name_display: "file-name-display".into(),
            run_button: "run-btn".into(),
            pause_button: "pause-btn".into(),
            reset_button: "reset-btn".into(),
            history_button: "history-btn".into(),
            iterations: "iterations".into(),
            current_score: "current-score".into(),
            execution_time: "execution-time".into(),
            score_progress: "score-progress".into(),
            total_runs: "total-runs".into(),
            best_score: "best-score".into(),
            selected_strategy: ".strategy-card.selected".into(),
            slider_label: ".slider-container label".into(),
            modal_content: ".modal-content".into(),
            hub_core: ".hub-core".into(),
            planet: ".planet".into(),
        }
    }
}
