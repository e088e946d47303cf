//! Run history records and the views built from them.
//!
//! Records come from `GET /api/history`; this module only parses and
//! formats them. Fetching lives in `web::history`.

use serde::{Deserialize, Serialize};

use crate::error::GalaxyResult;

/// Heading element and title of the history overlay.
pub const OVERLAY_HEADING: (&str, &str) = ("h3", "Run History");

/// Label of the overlay's close button.
pub const OVERLAY_CLOSE_LABEL: &str = "✖";

/// One past solver run as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub problem_type: String,
    pub algorithm_name: String,
    pub objective_value: f64,
    /// Seconds.
    pub execution_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Parse the JSON array returned by the history endpoint.
///
/// # Errors
///
/// Returns error if the body is not an array of records.
pub fn parse_history(body: &str) -> GalaxyResult<Vec<HistoryRecord>> {
    Ok(serde_json::from_str(body)?)
}

/// Header numbers on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuickStats {
    /// Number of recorded runs.
    pub total_runs: usize,
    /// Lowest objective value, if any run has a finite one.
    pub best_score: Option<f64>,
}

impl QuickStats {
    /// Summarize a history listing.
    #[must_use]
    pub fn from_records(records: &[HistoryRecord]) -> Self {
        let best_score = records
            .iter()
            .map(|r| r.objective_value)
            .filter(|v| v.is_finite())
            .reduce(f64::min);
        Self {
            total_runs: records.len(),
            best_score,
        }
    }

    /// Text for the total-runs counter.
    #[must_use]
    pub fn total_runs_text(&self) -> String {
        self.total_runs.to_string()
    }

    /// Text for the best-score counter; `None` leaves the element untouched.
    #[must_use]
    pub fn best_score_text(&self) -> Option<String> {
        self.best_score.map(|v| format!("{v:.2}"))
    }
}

/// Labelled lines of one overlay entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntryView {
    /// `(label, value)` rows in display order.
    pub rows: Vec<(&'static str, String)>,
    /// Timestamp footer; empty when the record has none.
    pub timestamp: String,
}

impl From<&HistoryRecord> for HistoryEntryView {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            rows: vec![
                ("Problem", record.problem_type.clone()),
                ("Algorithm", record.algorithm_name.clone()),
                ("Objective", record.objective_value.to_string()),
                ("Time", format!("{}s", record.execution_time)),
            ],
            timestamp: record.created_at.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"id": 1, "algorithm_name": "greedy", "problem_type": "tsp",
         "objective_value": 7544.37, "execution_time": 0.15,
         "created_at": "2024-01-15 10:30:00"},
        {"id": 2, "algorithm_name": "dp", "problem_type": "knapsack",
         "objective_value": 15, "execution_time": 0.08,
         "created_at": "2024-01-15 10:32:00"}
    ]"#;

    #[test]
    fn test_parse_sample() {
        let records = parse_history(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].algorithm_name, "greedy");
        assert_eq!(records[1].objective_value, 15.0);
    }

    #[test]
    fn test_optional_fields() {
        let records = parse_history(
            r#"[{"problem_type":"tsp","algorithm_name":"greedy","objective_value":1.5,"execution_time":2}]"#,
        )
        .unwrap();
        assert_eq!(records[0].id, None);
        assert_eq!(records[0].created_at, None);
    }

    #[test]
    fn test_malformed_body() {
        assert!(parse_history("{\"error\": true}").is_err());
    }

    #[test]
    fn test_quick_stats_pick_minimum() {
        let records = parse_history(SAMPLE).unwrap();
        let stats = QuickStats::from_records(&records);
        assert_eq!(stats.total_runs_text(), "2");
        assert_eq!(stats.best_score_text().as_deref(), Some("15.00"));
    }

    #[test]
    fn test_quick_stats_empty() {
        let stats = QuickStats::from_records(&[]);
        assert_eq!(stats.total_runs_text(), "0");
        assert_eq!(stats.best_score_text(), None);
    }

    #[test]
    fn test_entry_view() {
        let records = parse_history(SAMPLE).unwrap();
        let view = HistoryEntryView::from(&records[1]);
        assert_eq!(
            view.rows,
            vec![
                ("Problem", "knapsack".to_string()),
                ("Algorithm", "dp".to_string()),
                ("Objective", "15".to_string()),
                ("Time", "0.08s".to_string()),
            ]
        );
        assert_eq!(view.timestamp, "2024-01-15 10:32:00");
    }

    #[test]
    fn test_entry_view_without_timestamp() {
        let record = HistoryRecord {
            id: None,
            problem_type: "matching".into(),
            algorithm_name: "greedy".into(),
            objective_value: 3.0,
            execution_time: 0.12,
            created_at: None,
        };
        assert_eq!(HistoryEntryView::from(&record).timestamp, "");
    }
}
