//! Drop zone, file picker and the simulated progress bar.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;

use super::notifications::NotificationService;
use super::{animate, dom, modal};
use crate::anim::{Easing, Tween};
use crate::config::{DomIds, UploadConfig};
use crate::error::GalaxyResult;
use crate::upload::{Selection, UploadFlow};

/// Page side of the [`UploadFlow`].
#[derive(Clone)]
pub struct UploadController {
    document: web_sys::Document,
    ids: DomIds,
    config: UploadConfig,
    flow: Rc<RefCell<UploadFlow>>,
    notifier: NotificationService,
}

impl UploadController {
    pub fn new(
        document: web_sys::Document,
        ids: DomIds,
        config: UploadConfig,
        notifier: NotificationService,
    ) -> Self {
        let flow = UploadFlow::new(&config);
        Self {
            document,
            ids,
            config,
            flow: Rc::new(RefCell::new(flow)),
            notifier,
        }
    }

    /// Install every drop-zone, picker and button listener.
    pub fn install(&self) -> GalaxyResult<()> {
        let Some(zone) = self.document.get_element_by_id(&self.ids.drop_zone) else {
            log::debug!("no #{} on this page", self.ids.drop_zone);
            return Ok(());
        };

        for event in ["dragenter", "dragover"] {
            let target = zone.clone();
            on_drag(&zone, event, move |_| {
                let _ = target.class_list().add_1("highlight");
            });
        }
        {
            let target = zone.clone();
            on_drag(&zone, "dragleave", move |_| {
                let _ = target.class_list().remove_1("highlight");
            });
        }
        {
            let target = zone.clone();
            let controller = self.clone();
            on_drag(&zone, "drop", move |event| {
                let _ = target.class_list().remove_1("highlight");
                let names = event
                    .dyn_ref::<web_sys::DragEvent>()
                    .and_then(web_sys::DragEvent::data_transfer)
                    .and_then(|dt| dt.files())
                    .map(|files| file_names(&files))
                    .unwrap_or_default();
                controller.offer(&names);
            });
        }

        if let Ok(input) = dom::by_id::<web_sys::HtmlInputElement>(&self.document, &self.ids.file_input)
        {
            let picker = input.clone();
            dom::listen(&zone, "click", move |_: web_sys::Event| picker.click())?;

            let controller = self.clone();
            let changed = input.clone();
            dom::listen(&input, "change", move |_: web_sys::Event| {
                let names = changed.files().map(|f| file_names(&f)).unwrap_or_default();
                controller.offer(&names);
            })?;
        }

        let controller = self.clone();
        dom::setup_button(&self.document, &self.ids.upload_button, move || {
            controller.upload();
        })
    }

    /// Run the selection rule and mirror the outcome on the page.
    pub fn offer(&self, file_names: &[String]) {
        let mut notifier = self.notifier.clone();
        let outcome = self.flow.borrow_mut().offer(file_names, &mut notifier);
        match outcome {
            Ok(Selection::Selected(name)) => self.show_selection(Some(&name)),
            Ok(Selection::Ignored) => {}
            Err(e) => {
                log::warn!("{e}");
                self.show_selection(None);
            }
        }
    }

    fn show_selection(&self, file_name: Option<&str>) {
        let text = file_name.map(|n| format!("Selected: {n}")).unwrap_or_default();
        dom::set_text(&self.document, &self.ids.file_name_display, &text);
        if let Ok(button) = dom::by_id::<web_sys::HtmlElement>(&self.document, &self.ids.upload_button)
        {
            let display = if file_name.is_some() { "block" } else { "none" };
            dom::set_style(&button, "display", display);
        }
    }

    /// Start the simulated transfer of the selected file.
    pub fn upload(&self) {
        let Some(file_name) = self.flow.borrow_mut().begin_upload() else {
            return;
        };
        log::info!("uploading '{file_name}'");
        self.show_selection(None);

        let bar = match self.progress_bar() {
            Ok(bar) => bar,
            Err(e) => {
                log::error!("progress bar: {e}");
                self.finish_upload(None);
                return;
            }
        };

        let tween = Tween::new(f64::from(self.config.progress_ms), Easing::EaseOutQuad);
        let filling = bar.clone();
        let controller = self.clone();
        animate::play(
            tween,
            move |p| dom::set_style(&filling, "width", &format!("{:.2}%", p * 100.0)),
            move || controller.finish_upload(Some(&bar)),
        );
    }

    fn progress_bar(&self) -> GalaxyResult<web_sys::HtmlElement> {
        let zone = dom::by_id::<web_sys::Element>(&self.document, &self.ids.drop_zone)?;
        let bar = dom::create(&self.document, "div", "upload-progress")?;
        dom::set_style(&bar, "width", "0%");
        dom::append(&zone, &bar)?;
        Ok(bar)
    }

    fn finish_upload(&self, bar: Option<&web_sys::HtmlElement>) {
        let mut notifier = self.notifier.clone();
        let uploaded = self.flow.borrow_mut().complete_upload(&mut notifier);
        if let Some(bar) = bar {
            bar.remove();
        }
        if uploaded.is_some() {
            let document = self.document.clone();
            let ids = self.ids.clone();
            Timeout::new(self.config.close_delay_ms, move || {
                modal::close_upload_modal(&document, &ids);
            })
            .forget();
        }
    }
}

/// Drag listener that suppresses the browser's own file handling.
fn on_drag<F>(zone: &web_sys::Element, event: &'static str, mut callback: F)
where
    F: FnMut(&web_sys::Event) + 'static,
{
    EventListener::new_with_options(
        zone,
        event,
        EventListenerOptions::enable_prevent_default(),
        move |e| {
            e.prevent_default();
            e.stop_propagation();
            callback(e);
        },
    )
    .forget();
}

fn file_names(files: &web_sys::FileList) -> Vec<String> {
    (0..files.length())
        .filter_map(|i| files.get(i))
        .map(|f| f.name())
        .collect()
}
