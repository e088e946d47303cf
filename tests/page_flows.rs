//! Non-canvas page flows driven through the public API.
//!
//! These tests verify:
//! - Upload selection, rejection and completion with their toasts
//! - Quick stats and overlay entries built from a history payload
//! - Slider captions and particle rolls under the stock configuration

use optimization_galaxy::history::{
    parse_history, HistoryEntryView, OVERLAY_CLOSE_LABEL, OVERLAY_HEADING,
};
use optimization_galaxy::particles::{HybridMix, ParticleSpec};
use optimization_galaxy::prelude::*;
use optimization_galaxy::upload::{Selection, INVALID_FILE_MESSAGE, MODAL_DISPLAY};

// =============================================================================
// Upload
// =============================================================================

#[test]
fn drop_valid_file_then_upload() {
    let config = GalaxyConfig::default();
    let mut flow = UploadFlow::new(&config.upload);
    let mut toasts: Vec<Notification> = Vec::new();

    let selection = flow.offer(&["plan.tsp"], &mut toasts).unwrap();
    assert_eq!(selection, Selection::Selected("plan.tsp".into()));
    assert_eq!(flow.state().file_name(), Some("plan.tsp"));

    assert_eq!(flow.begin_upload().as_deref(), Some("plan.tsp"));
    assert_eq!(flow.complete_upload(&mut toasts).as_deref(), Some("plan.tsp"));

    assert_eq!(flow.state(), &UploadState::Idle);
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, NotificationLevel::Success);
    assert_eq!(toasts[0].message, "File \"plan.tsp\" uploaded successfully!");
}

#[test]
fn drop_image_is_rejected_once() {
    let mut flow = UploadFlow::default();
    let mut toasts: Vec<Notification> = Vec::new();

    let result = flow.offer(&["image.png"], &mut toasts);

    assert!(matches!(result, Err(GalaxyError::Validation(_))));
    assert_eq!(flow.state(), &UploadState::Idle);
    assert_eq!(toasts, vec![Notification::new(NotificationLevel::Error, INVALID_FILE_MESSAGE)]);
}

#[test]
fn upload_modal_opens_as_block() {
    assert_eq!(MODAL_DISPLAY, "block");
}

#[test]
fn custom_allow_list_from_yaml() {
    let config = GalaxyConfig::from_yaml("upload:\n  allowed_extensions: [\".XML\"]\n").unwrap();
    let mut flow = UploadFlow::new(&config.upload);
    let mut toasts: Vec<Notification> = Vec::new();

    assert!(flow.offer(&["graph.xml"], &mut toasts).is_ok());
    assert!(flow.offer(&["plan.tsp"], &mut toasts).is_err());
    assert_eq!(toasts.len(), 1);
}

// =============================================================================
// History
// =============================================================================

const HISTORY: &str = r#"[
    {"id": 3, "problem_type": "tsp", "algorithm_name": "hybrid",
     "objective_value": 512.25, "execution_time": 1.5, "created_at": "2024-02-01 09:00:00"},
    {"id": 4, "problem_type": "tsp", "algorithm_name": "greedy",
     "objective_value": 498.004, "execution_time": 0.2, "created_at": "2024-02-01 09:05:00"}
]"#;

#[test]
fn quick_stats_from_history_payload() {
    let records = parse_history(HISTORY).unwrap();
    let stats = QuickStats::from_records(&records);
    assert_eq!(stats.total_runs_text(), "2");
    assert_eq!(stats.best_score_text().as_deref(), Some("498.00"));
}

#[test]
fn overlay_entries_follow_record_order() {
    let records = parse_history(HISTORY).unwrap();
    let views: Vec<HistoryEntryView> = records.iter().map(HistoryEntryView::from).collect();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].rows[1], ("Algorithm", "hybrid".to_string()));
    assert_eq!(views[0].rows[3], ("Time", "1.5s".to_string()));
    assert_eq!(views[1].timestamp, "2024-02-01 09:05:00");
}

#[test]
fn overlay_markup_matches_page_stylesheet() {
    assert_eq!(OVERLAY_HEADING, ("h3", "Run History"));
    assert_eq!(OVERLAY_CLOSE_LABEL, "\u{2716}");
}

#[test]
fn history_endpoint_is_configurable() {
    let config = GalaxyConfig::from_yaml("api:\n  history_endpoint: /v2/runs\n").unwrap();
    assert_eq!(config.api.history_endpoint, "/v2/runs");
}

// =============================================================================
// Decorations
// =============================================================================

#[test]
fn slider_caption_at_common_positions() {
    assert_eq!(HybridMix::from_slider(0.0).label(), "Greedy 0% ←→ DP 100%");
    assert_eq!(HybridMix::from_slider(50.0).label(), "Greedy 50% ←→ DP 50%");
    assert_eq!(HybridMix::from_slider(72.6).label(), "Greedy 73% ←→ DP 27%");
}

#[test]
fn particles_roll_inside_stock_ranges() {
    let config = GalaxyConfig::default();
    let mut rng = GalaxyRng::new(99);
    for _ in 0..500 {
        let p = ParticleSpec::roll(&mut rng, &config.particles, 10.0, 20.0);
        assert!((1.0..4.0).contains(&p.size));
        assert!((2000.0..5000.0).contains(&p.duration_ms));
        assert!((0.0..360.0).contains(&p.hue));
        assert!((-100.0..100.0).contains(&p.dx));
        assert!((-100.0..100.0).contains(&p.dy));
    }
}

#[test]
fn particle_fades_out_completely() {
    let mut rng = GalaxyRng::new(1);
    let p = ParticleSpec::roll(&mut rng, &GalaxyConfig::default().particles, 0.0, 0.0);
    let tween = p.tween();
    let end = p.frame_style(tween.progress(p.duration_ms));
    assert!(tween.is_complete(p.duration_ms));
    assert_eq!(end.opacity, 0.0);
    assert_eq!(end.scale, 0.0);
}
