//! Step visualizer: the per-frame random-tour search shown on the canvas.
//!
//! # Architecture
//!
//! ```text
//! start() ──▶ request_frame ──▶ on_frame() ──┬──▶ request_frame ──▶ on_frame() …
//!                                            └──▶ finish()   (step == max_steps)
//! pause()/reset() ──▶ cancel_frame(pending)
//! ```
//!
//! The loop is an explicit state machine: `RunState::is_running` is the only
//! guard and `pending` holds the single outstanding frame. Everything the loop
//! touches on the page goes through a capability trait, so a run can be
//! driven frame by frame without a browser.

mod metrics;
mod strategy;

pub use metrics::{progress_percent, MetricsReadout};
pub use strategy::{parse_selection, Algorithm};

use serde::{Deserialize, Serialize};

use crate::config::VisualizerConfig;
use crate::engine::rng::GalaxyRng;
use crate::error::{GalaxyError, GalaxyResult};
use crate::notify::Notifier;
use crate::tsp::{generate_cities, City, Tour};

/// Warning shown when a run is started with no strategy selected.
pub const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one algorithm strategy.";

/// Toast shown when a run uses up its iteration budget.
pub const RUN_COMPLETE_MESSAGE: &str = "Optimization completed successfully!";

/// Drawing surface for the tour canvas.
pub trait Renderer {
    /// Clear to the empty view: background, grid, title.
    fn draw_background(&mut self);

    /// Draw every city; the first one is the origin.
    fn draw_cities(&mut self, cities: &[City]);

    /// Draw the forward edges of `tour` (no closing edge).
    fn draw_tour(&mut self, cities: &[City], tour: &Tour);

    /// Mark the city the current candidate is visiting.
    fn highlight_city(&mut self, city: &City);
}

/// Metric readouts and the run control next to the canvas.
pub trait ControlPanel {
    /// Replace all four metric displays.
    fn show_metrics(&mut self, readout: &MetricsReadout);

    /// Enable or disable the start control.
    fn set_run_enabled(&mut self, enabled: bool);
}

/// Opaque id of a requested animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Source of animation-frame callbacks.
///
/// Each requested frame must eventually call [`StepVisualizer::on_frame`]
/// unless it is cancelled first.
pub trait FrameScheduler {
    /// Ask for one callback on the next frame.
    ///
    /// # Errors
    ///
    /// Returns error if the host refuses to schedule the frame.
    fn request_frame(&mut self) -> GalaxyResult<FrameHandle>;

    /// Drop a pending callback. Unknown or already fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Mutable state of one visualization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Frames processed in this run.
    pub step: u32,
    /// Shortest candidate seen so far.
    pub best_tour: Option<Tour>,
    /// Length of `best_tour`; `+∞` before the first frame.
    pub best_distance: f64,
    /// Whether frames are being scheduled.
    pub is_running: bool,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            step: 0,
            best_tour: None,
            best_distance: f64::INFINITY,
            is_running: false,
        }
    }
}

/// Result of calling [`StepVisualizer::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A fresh run began.
    Started,
    /// A run was already in progress and keeps going untouched.
    AlreadyRunning,
}

/// Result of one frame callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// The run is not active; nothing happened.
    Idle,
    /// A step ran and the next frame is scheduled.
    Continue {
        /// Whether this step's candidate became the new best.
        improved: bool,
    },
    /// The last step ran and the run finalized.
    Finished {
        /// Best distance of the completed run.
        best_distance: f64,
    },
}

/// The frame-driven random-tour loop and its page capabilities.
pub struct StepVisualizer<R, C, N, S> {
    config: VisualizerConfig,
    rng: GalaxyRng,
    cities: Vec<City>,
    state: RunState,
    last_candidate: Option<Tour>,
    pending: Option<FrameHandle>,
    renderer: R,
    controls: C,
    notifier: N,
    scheduler: S,
}

impl<R, C, N, S> StepVisualizer<R, C, N, S>
where
    R: Renderer,
    C: ControlPanel,
    N: Notifier,
    S: FrameScheduler,
{
    /// Create an idle visualizer.
    pub fn new(
        config: VisualizerConfig,
        rng: GalaxyRng,
        renderer: R,
        controls: C,
        notifier: N,
        scheduler: S,
    ) -> Self {
        Self {
            config,
            rng,
            cities: Vec::new(),
            state: RunState::default(),
            last_candidate: None,
            pending: None,
            renderer,
            controls,
            notifier,
            scheduler,
        }
    }

    /// Current run state.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Whether a run is in progress.
    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Cities of the current (or last) run.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Candidate evaluated on the most recent frame.
    pub fn last_candidate(&self) -> Option<&Tour> {
        self.last_candidate.as_ref()
    }

    /// The outstanding frame request, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Settings in effect.
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Drawing surface.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Metric readouts and run control.
    pub fn controls(&self) -> &C {
        &self.controls
    }

    /// Toast sink.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Frame source.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Frame source, mutably.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Paint the empty canvas and the cleared metrics.
    pub fn draw_initial_state(&mut self) {
        self.renderer.draw_background();
        self.controls.show_metrics(&MetricsReadout::cleared());
    }

    /// Begin a fresh run for the selected strategies.
    ///
    /// An empty selection is refused even while a run is in progress; a
    /// non-empty one leaves a running run alone. Starting after a pause
    /// discards the paused run.
    ///
    /// # Errors
    ///
    /// Returns a validation error, after one warning toast, when `algorithms`
    /// is empty. Returns the scheduler error if the first frame cannot be
    /// requested; the visualizer is idle again in both cases.
    pub fn start(&mut self, algorithms: &[Algorithm]) -> GalaxyResult<StartOutcome> {
        if algorithms.is_empty() {
            self.notifier.warning(EMPTY_SELECTION_MESSAGE);
            return Err(GalaxyError::validation("no algorithm strategy selected"));
        }
        if self.state.is_running {
            log::debug!("run already in progress at step {}", self.state.step);
            return Ok(StartOutcome::AlreadyRunning);
        }

        self.cities = generate_cities(&mut self.rng, self.config.city_count);
        self.state = RunState {
            is_running: true,
            ..RunState::default()
        };
        self.last_candidate = None;
        self.controls.set_run_enabled(false);

        match self.scheduler.request_frame() {
            Ok(handle) => {
                self.pending = Some(handle);
                let ids: Vec<&str> = algorithms.iter().map(Algorithm::id).collect();
                log::info!(
                    "run started: {} cities, {} steps, strategies [{}]",
                    self.cities.len(),
                    self.config.max_steps,
                    ids.join(", ")
                );
                Ok(StartOutcome::Started)
            }
            Err(e) => {
                self.state.is_running = false;
                self.controls.set_run_enabled(true);
                log::error!("could not schedule first frame: {e}");
                Err(e)
            }
        }
    }

    /// Animation-frame callback: run one step and schedule the next.
    ///
    /// # Errors
    ///
    /// Returns the scheduler error if the next frame cannot be requested; the
    /// run is stopped with its state kept.
    pub fn on_frame(&mut self) -> GalaxyResult<FrameOutcome> {
        self.pending = None;
        if !self.state.is_running {
            return Ok(FrameOutcome::Idle);
        }

        self.state.step += 1;
        let step = self.state.step;

        let candidate = Tour::random(&mut self.rng, self.cities.len());
        let distance = candidate.distance(&self.cities);
        let improved = distance < self.state.best_distance;
        if improved {
            log::debug!(
                "step {step}: best {:.2} -> {distance:.2}",
                self.state.best_distance
            );
            self.state.best_distance = distance;
            self.state.best_tour = Some(candidate.clone());
        }

        self.redraw(&candidate);
        self.controls
            .show_metrics(&MetricsReadout::for_step(step, distance, &self.config));
        self.last_candidate = Some(candidate);

        if step >= self.config.max_steps {
            self.finish();
            return Ok(FrameOutcome::Finished {
                best_distance: self.state.best_distance,
            });
        }

        match self.scheduler.request_frame() {
            Ok(handle) => {
                self.pending = Some(handle);
                Ok(FrameOutcome::Continue { improved })
            }
            Err(e) => {
                log::error!("could not schedule frame {}: {e}", step + 1);
                self.halt();
                Err(e)
            }
        }
    }

    /// Stop scheduling frames, keeping the accumulated state. Idempotent.
    pub fn pause(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        if self.state.is_running {
            log::info!("run paused at step {}", self.state.step);
            self.halt();
        }
    }

    /// Pause, zero the counters and repaint the empty view.
    pub fn reset(&mut self) {
        self.pause();
        self.state = RunState::default();
        self.last_candidate = None;
        self.draw_initial_state();
    }

    fn redraw(&mut self, candidate: &Tour) {
        self.renderer.draw_background();
        self.renderer.draw_cities(&self.cities);
        if let Some(best) = self.state.best_tour.as_ref().filter(|t| t.len() > 1) {
            self.renderer.draw_tour(&self.cities, best);
        }
        if let Some(city) = candidate
            .stop_at(self.state.step as usize)
            .and_then(|idx| self.cities.get(idx))
        {
            self.renderer.highlight_city(city);
        }
    }

    fn halt(&mut self) {
        self.state.is_running = false;
        self.controls.set_run_enabled(true);
    }

    fn finish(&mut self) {
        self.halt();
        log::info!(
            "run finished after {} steps, best distance {:.2}",
            self.state.step,
            self.state.best_distance
        );
        self.notifier.success(RUN_COMPLETE_MESSAGE);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::notify::{Notification, NotificationLevel};

    #[derive(Debug, Default)]
    struct CountingRenderer {
        backgrounds: usize,
        tours: usize,
        highlights: usize,
    }

    impl Renderer for CountingRenderer {
        fn draw_background(&mut self) {
            self.backgrounds += 1;
        }
        fn draw_cities(&mut self, _cities: &[City]) {}
        fn draw_tour(&mut self, _cities: &[City], _tour: &Tour) {
            self.tours += 1;
        }
        fn highlight_city(&mut self, _city: &City) {
            self.highlights += 1;
        }
    }

    #[derive(Debug)]
    struct Panel {
        readout: MetricsReadout,
        run_enabled: bool,
    }

    impl Default for Panel {
        fn default() -> Self {
            Self {
                readout: MetricsReadout::cleared(),
                run_enabled: true,
            }
        }
    }

    impl ControlPanel for Panel {
        fn show_metrics(&mut self, readout: &MetricsReadout) {
            self.readout = readout.clone();
        }
        fn set_run_enabled(&mut self, enabled: bool) {
            self.run_enabled = enabled;
        }
    }

    #[derive(Debug, Default)]
    struct Frames {
        next: u64,
        pending: Vec<FrameHandle>,
        cancelled: Vec<FrameHandle>,
    }

    impl FrameScheduler for Frames {
        fn request_frame(&mut self) -> GalaxyResult<FrameHandle> {
            self.next += 1;
            let handle = FrameHandle(self.next);
            self.pending.push(handle);
            Ok(handle)
        }
        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.pending.retain(|h| *h != handle);
            self.cancelled.push(handle);
        }
    }

    type TestViz = StepVisualizer<CountingRenderer, Panel, Vec<Notification>, Frames>;

    fn viz(seed: u64) -> TestViz {
        StepVisualizer::new(
            VisualizerConfig::default(),
            GalaxyRng::new(seed),
            CountingRenderer::default(),
            Panel::default(),
            Vec::new(),
            Frames::default(),
        )
    }

    /// Fire the pending frame the way the browser would.
    fn fire(v: &mut TestViz) -> FrameOutcome {
        let handle = v.pending_frame().expect("a frame should be pending");
        v.scheduler_mut().pending.retain(|h| *h != handle);
        v.on_frame().expect("frame should run")
    }

    #[test]
    fn test_empty_selection_warns_once() {
        let mut v = viz(1);
        let result = v.start(&[]);
        assert!(matches!(result, Err(GalaxyError::Validation(_))));
        assert!(!v.is_running());
        assert_eq!(v.notifier().len(), 1);
        assert_eq!(v.notifier()[0].level, NotificationLevel::Warning);
        assert_eq!(v.notifier()[0].message, EMPTY_SELECTION_MESSAGE);
        assert!(v.pending_frame().is_none());
    }

    #[test]
    fn test_start_generates_cities_and_disables_run() {
        let mut v = viz(2);
        assert_eq!(v.start(&[Algorithm::Greedy]).unwrap(), StartOutcome::Started);
        assert!(v.is_running());
        assert_eq!(v.cities().len(), 15);
        assert_eq!(v.state().step, 0);
        assert!(v.state().best_distance.is_infinite());
        assert!(!v.controls().run_enabled);
        assert!(v.pending_frame().is_some());
    }

    #[test]
    fn test_double_start_keeps_single_loop() {
        let mut v = viz(3);
        v.start(&[Algorithm::Greedy]).unwrap();
        fire(&mut v);
        assert_eq!(
            v.start(&[Algorithm::DynamicProgramming]).unwrap(),
            StartOutcome::AlreadyRunning
        );
        assert_eq!(v.scheduler().pending.len(), 1);
        assert_eq!(v.state().step, 1);
    }

    #[test]
    fn test_first_frame_sets_best() {
        let mut v = viz(4);
        v.start(&[Algorithm::Greedy]).unwrap();
        let outcome = fire(&mut v);
        assert_eq!(outcome, FrameOutcome::Continue { improved: true });
        assert!(v.state().best_distance.is_finite());
        assert_eq!(v.renderer().tours, 1);
        assert_eq!(v.renderer().highlights, 1);
        assert_eq!(v.controls().readout.iterations, "1");
        assert_eq!(v.controls().readout.execution_time, "0.1s");
    }

    #[test]
    fn test_run_finishes_after_budget() {
        let mut v = viz(5);
        v.start(&[Algorithm::Backtracking]).unwrap();
        let mut frames = 0;
        loop {
            frames += 1;
            if let FrameOutcome::Finished { best_distance } = fire(&mut v) {
                assert_eq!(best_distance, v.state().best_distance);
                break;
            }
        }
        assert_eq!(frames, 100);
        assert_eq!(v.state().step, 100);
        assert!(!v.is_running());
        assert!(v.pending_frame().is_none());
        assert!(v.controls().run_enabled);
        assert_eq!(v.notifier().len(), 1);
        assert_eq!(v.notifier()[0].level, NotificationLevel::Success);
        assert_eq!(v.notifier()[0].message, RUN_COMPLETE_MESSAGE);
    }

    #[test]
    fn test_pause_cancels_and_keeps_state() {
        let mut v = viz(6);
        v.start(&[Algorithm::Greedy]).unwrap();
        for _ in 0..10 {
            fire(&mut v);
        }
        let before = v.state().clone();
        v.pause();
        assert!(!v.is_running());
        assert!(v.pending_frame().is_none());
        assert!(v.scheduler().pending.is_empty());
        assert_eq!(v.scheduler().cancelled.len(), 1);
        assert_eq!(v.state().step, before.step);
        assert_eq!(v.state().best_tour, before.best_tour);
        assert!(v.controls().run_enabled);

        v.pause();
        assert_eq!(v.scheduler().cancelled.len(), 1);
    }

    #[test]
    fn test_stale_frame_after_pause_is_idle() {
        let mut v = viz(7);
        v.start(&[Algorithm::Greedy]).unwrap();
        v.pause();
        assert_eq!(v.on_frame().unwrap(), FrameOutcome::Idle);
        assert_eq!(v.state().step, 0);
    }

    #[test]
    fn test_start_after_pause_is_fresh() {
        let mut v = viz(8);
        v.start(&[Algorithm::Greedy]).unwrap();
        for _ in 0..20 {
            fire(&mut v);
        }
        let old_cities = v.cities().to_vec();
        v.pause();

        v.start(&[Algorithm::Greedy]).unwrap();
        assert_eq!(v.state().step, 0);
        assert!(v.state().best_tour.is_none());
        assert!(v.state().best_distance.is_infinite());
        assert_ne!(v.cities(), old_cities.as_slice());
    }

    #[test]
    fn test_reset_clears_readouts() {
        let mut v = viz(9);
        v.start(&[Algorithm::Greedy]).unwrap();
        for _ in 0..5 {
            fire(&mut v);
        }
        let backgrounds = v.renderer().backgrounds;
        v.reset();
        assert!(!v.is_running());
        assert_eq!(v.state(), &RunState::default());
        assert_eq!(v.controls().readout, MetricsReadout::cleared());
        assert_eq!(v.renderer().backgrounds, backgrounds + 1);
    }

    #[test]
    fn test_failed_first_frame_rolls_back() {
        struct Refusing;
        impl FrameScheduler for Refusing {
            fn request_frame(&mut self) -> GalaxyResult<FrameHandle> {
                Err(GalaxyError::dom("no window"))
            }
            fn cancel_frame(&mut self, _handle: FrameHandle) {}
        }

        let mut v = StepVisualizer::new(
            VisualizerConfig::default(),
            GalaxyRng::new(10),
            CountingRenderer::default(),
            Panel::default(),
            Vec::<Notification>::new(),
            Refusing,
        );
        assert!(v.start(&[Algorithm::Greedy]).is_err());
        assert!(!v.is_running());
        assert!(v.controls().run_enabled);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod proptests {
    use super::*;
    use crate::notify::Notification;
    use proptest::prelude::*;

    struct NullRenderer;
    impl Renderer for NullRenderer {
        fn draw_background(&mut self) {}
        fn draw_cities(&mut self, _cities: &[City]) {}
        fn draw_tour(&mut self, _cities: &[City], _tour: &Tour) {}
        fn highlight_city(&mut self, _city: &City) {}
    }

    struct NullPanel;
    impl ControlPanel for NullPanel {
        fn show_metrics(&mut self, _readout: &MetricsReadout) {}
        fn set_run_enabled(&mut self, _enabled: bool) {}
    }

    #[derive(Default)]
    struct Counter(u64);
    impl FrameScheduler for Counter {
        fn request_frame(&mut self) -> GalaxyResult<FrameHandle> {
            self.0 += 1;
            Ok(FrameHandle(self.0))
        }
        fn cancel_frame(&mut self, _handle: FrameHandle) {}
    }

    proptest! {
        /// The best distance never increases during a run.
        #[test]
        fn prop_best_non_increasing(seed in 0u64..u64::MAX, cities in 2usize..40) {
            let config = VisualizerConfig { city_count: cities, ..VisualizerConfig::default() };
            let mut v = StepVisualizer::new(
                config, GalaxyRng::new(seed), NullRenderer, NullPanel,
                Vec::<Notification>::new(), Counter::default(),
            );
            v.start(&[Algorithm::Greedy]).unwrap();
            let mut previous = v.state().best_distance;
            while v.is_running() {
                v.on_frame().unwrap();
                let best = v.state().best_distance;
                prop_assert!(best <= previous, "best went from {} to {}", previous, best);
                previous = best;
            }
        }

        /// Every candidate evaluated is a permutation of the run's cities.
        #[test]
        fn prop_candidates_are_permutations(seed in 0u64..u64::MAX) {
            let mut v = StepVisualizer::new(
                VisualizerConfig::default(), GalaxyRng::new(seed), NullRenderer, NullPanel,
                Vec::<Notification>::new(), Counter::default(),
            );
            v.start(&[Algorithm::DivideAndConquer]).unwrap();
            while v.is_running() {
                v.on_frame().unwrap();
                let candidate = v.last_candidate().unwrap();
                prop_assert!(candidate.is_permutation_of(15));
            }
            prop_assert_eq!(v.state().step, 100);
        }
    }
}
