//! Particle elements and the strategy-mixer slider.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::{Interval, Timeout};
use wasm_bindgen::JsCast;

use super::animate;
use super::dom;
use crate::config::{DomIds, ParticleConfig};
use crate::engine::rng::GalaxyRng;
use crate::error::GalaxyResult;
use crate::particles::{slider_thumb, AmbientSpawner, HybridMix, ParticleSpec};

/// Spawns self-removing `div.particle` elements.
#[derive(Clone)]
pub struct ParticleEmitter {
    document: web_sys::Document,
    container: Option<web_sys::Element>,
    config: ParticleConfig,
    rng: Rc<RefCell<GalaxyRng>>,
}

impl ParticleEmitter {
    /// Emitter appending to `#particles_container`, or `<body>` without one.
    pub fn new(
        document: web_sys::Document,
        ids: &DomIds,
        config: ParticleConfig,
        rng: GalaxyRng,
    ) -> Self {
        let container = document
            .get_element_by_id(&ids.particles_container)
            .or_else(|| document.body().map(Into::into));
        Self {
            document,
            container,
            config,
            rng: Rc::new(RefCell::new(rng)),
        }
    }

    /// Spawn one particle at viewport coordinates `(x, y)`.
    pub fn spawn(&self, x: f64, y: f64) -> GalaxyResult<()> {
        let Some(container) = &self.container else {
            return Ok(());
        };
        let spec = ParticleSpec::roll(&mut self.rng.borrow_mut(), &self.config, x, y);

        let el = dom::create(&self.document, "div", "particle")?;
        dom::set_style(&el, "left", &format!("{:.2}px", spec.x));
        dom::set_style(&el, "top", &format!("{:.2}px", spec.y));
        dom::set_style(&el, "width", &format!("{:.2}px", spec.size));
        dom::set_style(&el, "height", &format!("{:.2}px", spec.size));
        dom::set_style(&el, "background", &spec.color());
        dom::set_style(&el, "box-shadow", &spec.box_shadow());
        dom::append(container, &el)?;

        let animated = el.clone();
        animate::play(
            spec.tween(),
            move |p| {
                let frame = spec.frame_style(p);
                dom::set_style(&animated, "transform", &frame.transform());
                dom::set_style(&animated, "opacity", &format!("{:.3}", frame.opacity));
            },
            move || el.remove(),
        );
        Ok(())
    }

    fn viewport(&self) -> (f64, f64) {
        web_sys::window().map_or((0.0, 0.0), |w| {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            (width, height)
        })
    }

    /// Sprinkle the configured number of particles over the viewport.
    pub fn scatter_initial(&self) {
        let (w, h) = self.viewport();
        for _ in 0..self.config.initial_count {
            let (x, y) = {
                let mut rng = self.rng.borrow_mut();
                (rng.gen_range_f64(0.0, w), rng.gen_range_f64(0.0, h))
            };
            if let Err(e) = self.spawn(x, y) {
                log::warn!("initial particle: {e}");
                return;
            }
        }
    }

    /// Start the ambient timer. Runs for the page lifetime.
    pub fn start_ambient(&self) {
        let spawner = AmbientSpawner::new(&self.config);
        let emitter = self.clone();
        Interval::new(self.config.ambient_interval_ms, move || {
            let (w, h) = emitter.viewport();
            let position = spawner.tick(&mut emitter.rng.borrow_mut(), w, h);
            if let Some((x, y)) = position {
                if let Err(e) = emitter.spawn(x, y) {
                    log::warn!("ambient particle: {e}");
                }
            }
        })
        .forget();
    }

    /// Spawn the configured burst at `(x, y)`, one particle per spacing step.
    pub fn burst(&self, x: f64, y: f64) {
        for i in 0..self.config.burst_count {
            let emitter = self.clone();
            Timeout::new(i * self.config.burst_spacing_ms, move || {
                if let Err(e) = emitter.spawn(x, y) {
                    log::warn!("burst particle: {e}");
                }
            })
            .forget();
        }
    }
}

/// Wire the hybrid slider: caption update and a particle burst at the thumb.
pub fn setup_strategy_mixer(
    document: &web_sys::Document,
    ids: &DomIds,
    emitter: ParticleEmitter,
) -> GalaxyResult<()> {
    let Some(slider) = document
        .get_element_by_id(&ids.hybrid_slider)
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
    else {
        log::debug!("no #{} on this page", ids.hybrid_slider);
        return Ok(());
    };

    let doc = document.clone();
    let label_selector = ids.slider_label.clone();
    let input = slider.clone();
    dom::listen(&slider, "input", move |_: web_sys::Event| {
        let value = input.value_as_number();
        let mix = HybridMix::from_slider(value);
        if let Some(label) = dom::query(&doc, &label_selector) {
            label.set_text_content(Some(&mix.label()));
        }

        let rect = input.get_bounding_client_rect();
        let (x, y) = slider_thumb(rect.left(), rect.top(), rect.width(), value);
        emitter.burst(x, y);
    })
}
