//! # optimization-galaxy
//!
//! Browser presentation layer for the Optimization Galaxy demo page.
//!
//! The crate is split the same way on every seam:
//! - a renderer-agnostic core (tours, run state, upload state machine,
//!   notifications, particles, tweens, history) that runs and tests natively
//! - a `web` module (feature `wasm`) that binds the core to the DOM, the 2D
//!   canvas, animation frames, timers and `fetch`
//!
//! ## Example
//!
//! ```rust
//! use optimization_galaxy::prelude::*;
//!
//! let cities = vec![City::new(0, 0.0, 0.0), City::new(1, 100.0, 0.0), City::new(2, 0.0, 100.0)];
//! let tour = Tour::identity(3);
//! assert!((tour.distance(&cities) - 341.42).abs() < 0.01);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate,
)]

pub mod anim;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod notify;
pub mod particles;
pub mod tsp;
pub mod upload;
pub mod visualizer;

#[cfg(feature = "wasm")]
pub mod web;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::anim::{Easing, Tween};
    pub use crate::config::{GalaxyConfig, GalaxyConfigBuilder};
    pub use crate::engine::rng::GalaxyRng;
    pub use crate::error::{GalaxyError, GalaxyResult};
    pub use crate::history::{HistoryRecord, QuickStats};
    pub use crate::notify::{Notification, NotificationLevel, Notifier};
    pub use crate::tsp::{City, Tour};
    pub use crate::upload::{UploadFlow, UploadState};
    pub use crate::visualizer::{
        Algorithm, ControlPanel, FrameHandle, FrameScheduler, MetricsReadout, Renderer, RunState,
        StepVisualizer,
    };
}

/// Re-export for public API
pub use error::{GalaxyError, GalaxyResult};

/// Crate version, embedded by the build script.
pub const VERSION: &str = env!("GALAXY_VERSION");

/// Short git hash of the build, or `unknown` outside a checkout.
pub const GIT_HASH: &str = env!("GALAXY_GIT_HASH");
