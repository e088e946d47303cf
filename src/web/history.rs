//! Quick stats and the run history overlay.

use gloo::net::http::Request;

use super::dom;
use crate::config::DomIds;
use crate::error::{GalaxyError, GalaxyResult};
use crate::history::{
    parse_history, HistoryEntryView, HistoryRecord, QuickStats, OVERLAY_CLOSE_LABEL,
    OVERLAY_HEADING,
};

/// `GET` the history listing.
pub async fn fetch_history(endpoint: &str) -> GalaxyResult<Vec<HistoryRecord>> {
    let response = Request::get(endpoint)
        .send()
        .await
        .map_err(|e| GalaxyError::network(e.to_string()))?;
    if !response.ok() {
        return Err(GalaxyError::network(format!(
            "{endpoint} answered {}",
            response.status()
        )));
    }
    let body = response
        .text()
        .await
        .map_err(|e| GalaxyError::network(e.to_string()))?;
    parse_history(&body)
}

/// Fill the header counters from the history listing. Failures are logged.
pub async fn load_quick_stats(document: web_sys::Document, ids: DomIds, endpoint: String) {
    match fetch_history(&endpoint).await {
        Ok(records) => {
            let stats = QuickStats::from_records(&records);
            dom::set_text(&document, &ids.total_runs, &stats.total_runs_text());
            if let Some(best) = stats.best_score_text() {
                dom::set_text(&document, &ids.best_score, &best);
            }
        }
        Err(e) => log::error!("quick stats: {e}"),
    }
}

/// Fetch the history and open it in an overlay. Failures are logged.
pub async fn show_history(document: web_sys::Document, endpoint: String) {
    let records = match fetch_history(&endpoint).await {
        Ok(records) => records,
        Err(e) => {
            log::error!("history: {e}");
            return;
        }
    };
    if let Err(e) = open_overlay(&document, &records) {
        log::error!("history overlay: {e}");
    }
}

fn open_overlay(document: &web_sys::Document, records: &[HistoryRecord]) -> GalaxyResult<()> {
    let body = document
        .body()
        .ok_or_else(|| GalaxyError::dom("no <body>"))?;

    let overlay = dom::create(document, "div", "history-overlay")?;
    let modal = dom::create(document, "div", "history-modal")?;
    let close =
        dom::append_text(document, &modal, "button", "history-close", OVERLAY_CLOSE_LABEL)?;
    let (heading, title) = OVERLAY_HEADING;
    dom::append_text(document, &modal, heading, "", title)?;

    let list = dom::create(document, "div", "history-list")?;
    for record in records {
        let view = HistoryEntryView::from(record);
        let item = dom::create(document, "div", "history-item")?;
        for (label, value) in &view.rows {
            let row = dom::create(document, "div", "")?;
            dom::append_text(document, &row, "strong", "", &format!("{label}:"))?;
            dom::append_text(document, &row, "span", "", &format!(" {value}"))?;
            dom::append(&item, &row)?;
        }
        dom::append_text(document, &item, "div", "timestamp", &view.timestamp)?;
        dom::append(&list, &item)?;
    }
    dom::append(&modal, &list)?;
    dom::append(&overlay, &modal)?;
    dom::append(&body, &overlay)?;

    let target = overlay.clone();
    dom::listen(&close, "click", move |_: web_sys::Event| target.remove())?;

    let target = overlay.clone();
    dom::listen(&overlay, "click", move |e: web_sys::Event| {
        let backdrop: &web_sys::EventTarget = target.as_ref();
        if e.target().as_ref() == Some(backdrop) {
            target.remove();
        }
    })
}
