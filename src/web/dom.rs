//! Thin `web-sys` helpers shared by the page components.
//!
//! Lookups that the page template may legitimately omit return `Option`;
//! lookups a component cannot work without return `GalaxyResult`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::{GalaxyError, GalaxyResult};

pub fn window() -> GalaxyResult<web_sys::Window> {
    web_sys::window().ok_or_else(|| GalaxyError::dom("no window"))
}

pub fn document() -> GalaxyResult<web_sys::Document> {
    window()?
        .document()
        .ok_or_else(|| GalaxyError::dom("no document"))
}

/// Element by id, cast to `T`.
pub fn by_id<T: JsCast>(document: &web_sys::Document, id: &str) -> GalaxyResult<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| GalaxyError::dom(format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| GalaxyError::dom(format!("#{id} has an unexpected element type")))
}

/// First element matching `selector`.
pub fn query(document: &web_sys::Document, selector: &str) -> Option<web_sys::HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
}

/// First descendant of `parent` matching `selector`.
pub fn query_in(parent: &web_sys::Element, selector: &str) -> Option<web_sys::HtmlElement> {
    parent
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
}

/// Every element matching `selector`, in document order.
pub fn query_all(document: &web_sys::Document, selector: &str) -> Vec<web_sys::HtmlElement> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .collect()
}

pub fn set_text(document: &web_sys::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Set one inline style property, ignoring browsers that reject the value.
pub fn set_style(el: &web_sys::HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

/// Create `<tag class="class">`.
pub fn create(
    document: &web_sys::Document,
    tag: &str,
    class: &str,
) -> GalaxyResult<web_sys::HtmlElement> {
    let el = document
        .create_element(tag)
        .map_err(|_| GalaxyError::dom(format!("cannot create <{tag}>")))?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| GalaxyError::dom(format!("<{tag}> is not an HTML element")))?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

/// Create `<tag class="class">text</tag>` inside `parent`.
pub fn append_text(
    document: &web_sys::Document,
    parent: &web_sys::Element,
    tag: &str,
    class: &str,
    text: &str,
) -> GalaxyResult<web_sys::HtmlElement> {
    let el = create(document, tag, class)?;
    el.set_text_content(Some(text));
    append(parent, &el)?;
    Ok(el)
}

pub fn append(parent: &web_sys::Element, child: &web_sys::Element) -> GalaxyResult<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|_| GalaxyError::dom("appendChild failed"))
}

/// Attach a listener for the lifetime of the page.
pub fn listen<E, F>(target: &web_sys::EventTarget, event: &str, callback: F) -> GalaxyResult<()>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let mut callback = callback;
    let closure = Closure::wrap(Box::new(move |e: web_sys::Event| {
        if let Ok(e) = e.dyn_into::<E>() {
            callback(e);
        }
    }) as Box<dyn FnMut(_)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|_| GalaxyError::dom(format!("cannot listen for '{event}'")))?;
    closure.forget();
    Ok(())
}

/// Click handler on `#id`; a missing button is skipped.
pub fn setup_button<F>(document: &web_sys::Document, id: &str, mut callback: F) -> GalaxyResult<()>
where
    F: FnMut() + 'static,
{
    match document.get_element_by_id(id) {
        Some(btn) => listen(&btn, "click", move |_: web_sys::Event| callback()),
        None => {
            log::debug!("no #{id} on this page");
            Ok(())
        }
    }
}
