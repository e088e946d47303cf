//! Pulsing hub and planets of the 2D galaxy.

use super::{animate, dom};
use crate::anim::{lerp, Easing, Tween};
use crate::config::DomIds;

const HUB_CYCLE_MS: f64 = 3000.0;
const PLANET_CYCLE_MS: f64 = 2000.0;
const PLANET_STAGGER_MS: f64 = 500.0;

/// Start the looping pulses. Pages without a galaxy are left alone.
pub fn start_pulses(document: &web_sys::Document, ids: &DomIds) {
    if let Some(hub) = dom::query(document, &ids.hub_core) {
        let pulse = Tween::new(HUB_CYCLE_MS, Easing::EaseInOutSine).alternate();
        animate::play_forever(pulse, move |p| {
            dom::set_style(&hub, "transform", &format!("scale({:.3})", lerp(0.8, 1.2, p)));
            dom::set_style(&hub, "opacity", &format!("{:.3}", lerp(0.7, 1.0, p)));
        });
    }

    for (index, planet) in dom::query_all(document, &ids.planet).into_iter().enumerate() {
        let pulse = Tween::new(PLANET_CYCLE_MS, Easing::EaseInOutSine)
            .alternate()
            .with_delay(index as f64 * PLANET_STAGGER_MS);
        animate::play_forever(pulse, move |p| {
            dom::set_style(&planet, "transform", &format!("scale({:.3})", lerp(0.8, 1.1, p)));
        });
    }
}
