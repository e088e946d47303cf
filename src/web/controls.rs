//! Metric readouts and the run button.

use super::dom;
use crate::config::DomIds;
use crate::visualizer::{ControlPanel, MetricsReadout};

/// [`ControlPanel`] writing into the page's metric elements.
pub struct DomControlPanel {
    document: web_sys::Document,
    ids: DomIds,
}

impl DomControlPanel {
    pub fn new(document: web_sys::Document, ids: DomIds) -> Self {
        Self { document, ids }
    }
}

impl ControlPanel for DomControlPanel {
    fn show_metrics(&mut self, readout: &MetricsReadout) {
        dom::set_text(&self.document, &self.ids.iterations, &readout.iterations);
        dom::set_text(&self.document, &self.ids.current_score, &readout.current_score);
        dom::set_text(
            &self.document,
            &self.ids.execution_time,
            &readout.execution_time,
        );
        if let Ok(bar) = dom::by_id::<web_sys::HtmlElement>(&self.document, &self.ids.score_progress)
        {
            dom::set_style(&bar, "width", &readout.progress_width);
        }
    }

    fn set_run_enabled(&mut self, enabled: bool) {
        match dom::by_id::<web_sys::HtmlButtonElement>(&self.document, &self.ids.run_button) {
            Ok(button) => button.set_disabled(!enabled),
            Err(e) => log::debug!("{e}"),
        }
    }
}
