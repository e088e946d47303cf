//! Upload modal open/close animation.

use super::animate;
use super::dom;
use crate::anim::{lerp, Easing, Tween};
use crate::config::DomIds;
use crate::upload::MODAL_DISPLAY;

const OPEN: Tween = Tween::new(500.0, Easing::EaseOutBack);
const CLOSE: Tween = Tween::new(300.0, Easing::EaseInBack);

fn apply(content: &web_sys::HtmlElement, shown: f64) {
    dom::set_style(content, "transform", &format!("scale({:.3})", lerp(0.8, 1.0, shown)));
    dom::set_style(content, "opacity", &format!("{:.3}", shown.clamp(0.0, 1.0)));
}

/// Display the modal and grow its content in.
pub fn show_upload_modal(document: &web_sys::Document, ids: &DomIds) {
    let Ok(modal) = dom::by_id::<web_sys::HtmlElement>(document, &ids.upload_modal) else {
        log::warn!("no #{} to show", ids.upload_modal);
        return;
    };
    dom::set_style(&modal, "display", MODAL_DISPLAY);

    if let Some(content) = dom::query_in(&modal, &ids.modal_content) {
        apply(&content, 0.0);
        animate::play(OPEN, move |p| apply(&content, p), || {});
    }
}

/// Shrink the content out, then hide the modal.
pub fn close_upload_modal(document: &web_sys::Document, ids: &DomIds) {
    let Ok(modal) = dom::by_id::<web_sys::HtmlElement>(document, &ids.upload_modal) else {
        return;
    };
    match dom::query_in(&modal, &ids.modal_content) {
        Some(content) => animate::play(
            CLOSE,
            move |p| apply(&content, 1.0 - p),
            move || dom::set_style(&modal, "display", "none"),
        ),
        None => dom::set_style(&modal, "display", "none"),
    }
}
