//! Shared runtime services for every page component.
//!
//! Currently only randomness lives here; scheduling is a per-component
//! capability (see [`crate::visualizer::FrameScheduler`]).

pub mod rng;

pub use rng::GalaxyRng;
