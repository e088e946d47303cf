//! Browser bindings (feature `wasm`).
//!
//! # Architecture
//!
//! ```text
//! HTML: import init, { GalaxyApp } from './pkg/optimization_galaxy.js';
//!       await init(); window.galaxy = GalaxyApp.mount();
//! ```
//!
//! [`GalaxyApp::mount`] wires every component to the page once. Button and
//! drop-zone handlers hold clones of the shared [`Page`] context; the step
//! visualizer sits in an `Rc<RefCell<_>>` that its frame scheduler references
//! weakly.

mod animate;
pub mod api;
pub mod canvas;
pub mod controls;
pub mod dom;
mod galaxy;
pub mod history;
pub mod modal;
pub mod notifications;
pub mod particles;
pub mod scheduler;
pub mod upload;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

use crate::config::GalaxyConfig;
use crate::engine::rng::GalaxyRng;
use crate::error::{GalaxyError, GalaxyResult};
use crate::visualizer::{parse_selection, StartOutcome, StepVisualizer};

use canvas::CanvasRenderer;
use controls::DomControlPanel;
use notifications::NotificationService;
use particles::ParticleEmitter;
use scheduler::RafScheduler;
use upload::UploadController;

/// The step visualizer bound to the canvas, the metric elements, DOM toasts
/// and `requestAnimationFrame`.
pub type WebVisualizer =
    StepVisualizer<CanvasRenderer, DomControlPanel, NotificationService, RafScheduler>;

/// Install the panic hook and the console logger.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// Seed for pages without a pinned one.
fn random_seed() -> u64 {
    (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64
}

/// Shared handles every page callback works through.
#[derive(Clone)]
struct Page {
    document: web_sys::Document,
    config: Rc<GalaxyConfig>,
    visualizer: Rc<RefCell<WebVisualizer>>,
    uploads: UploadController,
    notifier: NotificationService,
}

impl Page {
    fn mount(config: GalaxyConfig) -> GalaxyResult<Self> {
        let document = dom::document()?;
        let seed = config.visualizer.seed.unwrap_or_else(random_seed);
        let rng = GalaxyRng::new(seed);
        let ids = &config.dom;

        let notifier = NotificationService::new(document.clone(), config.notifications.clone());
        let renderer = CanvasRenderer::new(dom::by_id::<web_sys::HtmlCanvasElement>(
            &document,
            &ids.problem_canvas,
        )?)?;
        let controls = DomControlPanel::new(document.clone(), ids.clone());
        let visualizer = Rc::new_cyclic(|weak| {
            RefCell::new(StepVisualizer::new(
                config.visualizer.clone(),
                rng.fork(0),
                renderer,
                controls,
                notifier.clone(),
                RafScheduler::new(weak.clone()),
            ))
        });
        visualizer.borrow_mut().draw_initial_state();

        let uploads = UploadController::new(
            document.clone(),
            ids.clone(),
            config.upload.clone(),
            notifier.clone(),
        );
        uploads.install()?;

        let emitter = ParticleEmitter::new(
            document.clone(),
            ids,
            config.particles.clone(),
            rng.fork(1),
        );
        emitter.scatter_initial();
        emitter.start_ambient();
        particles::setup_strategy_mixer(&document, ids, emitter)?;

        galaxy::start_pulses(&document, ids);

        let page = Self {
            document,
            config: Rc::new(config),
            visualizer,
            uploads,
            notifier,
        };
        page.wire_buttons()?;
        page.load_quick_stats();

        log::info!(
            "optimization galaxy {} ({}) mounted, seed {seed}",
            crate::VERSION,
            crate::GIT_HASH
        );
        Ok(page)
    }

    fn wire_buttons(&self) -> GalaxyResult<()> {
        let ids = &self.config.dom;
        let page = self.clone();
        dom::setup_button(&self.document, &ids.run_button, move || page.run_optimization())?;
        let page = self.clone();
        dom::setup_button(&self.document, &ids.pause_button, move || page.pause())?;
        let page = self.clone();
        dom::setup_button(&self.document, &ids.reset_button, move || page.reset())?;
        let page = self.clone();
        dom::setup_button(&self.document, &ids.history_button, move || page.show_history())
    }

    fn selected_algorithm_ids(&self) -> Vec<String> {
        dom::query_all(&self.document, &self.config.dom.selected_strategy)
            .iter()
            .map(|card| card.get_attribute("data-algorithm").unwrap_or_default())
            .collect()
    }

    fn with_visualizer(&self, action: impl FnOnce(&mut WebVisualizer)) {
        match self.visualizer.try_borrow_mut() {
            Ok(mut visualizer) => action(&mut visualizer),
            Err(_) => log::warn!("visualizer busy; input dropped"),
        }
    }

    fn run_optimization(&self) {
        let algorithms = parse_selection(self.selected_algorithm_ids());
        self.with_visualizer(|v| match v.start(&algorithms) {
            Ok(StartOutcome::Started) => {}
            Ok(StartOutcome::AlreadyRunning) => log::debug!("run button ignored while running"),
            Err(e) if e.is_user_facing() => log::warn!("{e}"),
            Err(e) => log::error!("could not start run: {e}"),
        });
    }

    fn pause(&self) {
        self.with_visualizer(WebVisualizer::pause);
    }

    fn reset(&self) {
        self.with_visualizer(WebVisualizer::reset);
    }

    fn show_history(&self) {
        let document = self.document.clone();
        let endpoint = self.config.api.history_endpoint.clone();
        spawn_local(history::show_history(document, endpoint));
    }

    fn load_quick_stats(&self) {
        spawn_local(history::load_quick_stats(
            self.document.clone(),
            self.config.dom.clone(),
            self.config.api.history_endpoint.clone(),
        ));
    }
}

/// The mounted page.
#[wasm_bindgen]
pub struct GalaxyApp {
    page: Page,
}

#[wasm_bindgen]
impl GalaxyApp {
    /// Mount with the embedded default configuration.
    pub fn mount() -> Result<GalaxyApp, JsValue> {
        let config = GalaxyConfig::embedded()?;
        Ok(Self {
            page: Page::mount(config)?,
        })
    }

    /// Mount with a YAML configuration.
    #[wasm_bindgen(js_name = mountWithConfig)]
    pub fn mount_with_config(yaml: &str) -> Result<GalaxyApp, JsValue> {
        let config = GalaxyConfig::from_yaml(yaml)?;
        Ok(Self {
            page: Page::mount(config)?,
        })
    }

    /// Start a visualization run for the selected strategy cards.
    #[wasm_bindgen(js_name = runOptimization)]
    pub fn run_optimization(&self) {
        self.page.run_optimization();
    }

    pub fn pause(&self) {
        self.page.pause();
    }

    pub fn reset(&self) {
        self.page.reset();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.page
            .visualizer
            .try_borrow()
            .is_ok_and(|v| v.is_running())
    }

    #[wasm_bindgen(js_name = showHistory)]
    pub fn show_history(&self) {
        self.page.show_history();
    }

    #[wasm_bindgen(js_name = showUploadModal)]
    pub fn show_upload_modal(&self) {
        modal::show_upload_modal(&self.page.document, &self.page.config.dom);
    }

    #[wasm_bindgen(js_name = closeUploadModal)]
    pub fn close_upload_modal(&self) {
        modal::close_upload_modal(&self.page.document, &self.page.config.dom);
    }

    /// Offer file names to the upload flow as if they had been dropped.
    #[wasm_bindgen(js_name = selectFiles)]
    pub fn select_files(&self, names: &js_sys::Array) {
        let names: Vec<String> = names.iter().filter_map(|v| v.as_string()).collect();
        self.page.uploads.offer(&names);
    }

    /// `GET` (no `data`) or `POST` JSON to `endpoint`.
    ///
    /// Resolves to the parsed response, or `null` after a network-error toast.
    #[wasm_bindgen(js_name = apiCall)]
    pub fn api_call(&self, endpoint: String, data: JsValue) -> js_sys::Promise {
        let mut notifier = self.page.notifier.clone();
        future_to_promise(async move {
            let body = json_body(&data)?;
            let response = api::api_call(&endpoint, body.as_ref(), &mut notifier).await;
            match response {
                Some(value) => {
                    let text = serde_json::to_string(&value).map_err(GalaxyError::from)?;
                    js_sys::JSON::parse(&text)
                }
                None => Ok(JsValue::NULL),
            }
        })
    }
}

/// `undefined`/`null` mean no body.
fn json_body(data: &JsValue) -> Result<Option<serde_json::Value>, JsValue> {
    if data.is_undefined() || data.is_null() {
        return Ok(None);
    }
    let text = js_sys::JSON::stringify(data)?
        .as_string()
        .ok_or_else(|| GalaxyError::validation("request body is not serializable"))?;
    Ok(Some(serde_json::from_str(&text).map_err(GalaxyError::from)?))
}
