//! Selectable solver strategies.
//!
//! The cards on the page carry these identifiers in `data-algorithm`. The
//! visualizer only checks that at least one card is selected, so ids it does
//! not know are kept as [`Algorithm::Other`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GalaxyError;

/// A solver strategy card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Algorithm {
    Greedy,
    DynamicProgramming,
    Backtracking,
    BranchAndBound,
    DivideAndConquer,
    /// A card id outside the built-in set, as written on the card.
    Other(String),
}

impl Algorithm {
    /// Every strategy, in card order.
    pub const ALL: [Self; 5] = [
        Self::Greedy,
        Self::DynamicProgramming,
        Self::Backtracking,
        Self::BranchAndBound,
        Self::DivideAndConquer,
    ];

    /// Identifier used by the page and the backend.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Greedy => "greedy",
            Self::DynamicProgramming => "dp",
            Self::Backtracking => "backtracking",
            Self::BranchAndBound => "branchbound",
            Self::DivideAndConquer => "divideconquer",
            Self::Other(id) => id,
        }
    }

    /// Map a card id to its strategy, keeping unknown ids as [`Self::Other`].
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        id.parse().unwrap_or_else(|_| Self::Other(id.trim().to_string()))
    }

    /// Whether this is one of the built-in strategies.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for Algorithm {
    fn from(id: String) -> Self {
        Self::from_id(&id)
    }
}

impl From<Algorithm> for String {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.id().to_string()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Strict parse: only the built-in ids are accepted.
impl FromStr for Algorithm {
    type Err = GalaxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.id() == s.trim())
            .ok_or_else(|| GalaxyError::validation(format!("unknown algorithm '{s}'")))
    }
}

/// Parse the ids of the selected cards, one entry per distinct id.
///
/// Unknown ids (including a card without an id) are kept as
/// [`Algorithm::Other`] with a warning.
pub fn parse_selection<I, S>(ids: I) -> Vec<Algorithm>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut selected = Vec::new();
    for id in ids {
        let algorithm = Algorithm::from_id(id.as_ref());
        if !algorithm.is_known() {
            log::warn!("unknown algorithm '{}'", algorithm.id());
        }
        if !selected.contains(&algorithm) {
            selected.push(algorithm);
        }
    }
    selected
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_roundtrip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.id().parse::<Algorithm>().ok(), Some(algorithm.clone()));
            assert_eq!(Algorithm::from_id(algorithm.id()), algorithm);
        }
    }

    #[test]
    fn test_strict_parse_rejects_unknown() {
        assert!("simulated-annealing".parse::<Algorithm>().is_err());
        assert_eq!(
            Algorithm::from_id("simulated-annealing"),
            Algorithm::Other("simulated-annealing".to_string())
        );
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&Algorithm::BranchAndBound).unwrap();
        assert_eq!(json, "\"branchbound\"");
    }

    #[test]
    fn test_serde_keeps_unknown_ids() {
        let other: Algorithm = serde_json::from_str("\"hybrid\"").unwrap();
        assert_eq!(other, Algorithm::Other("hybrid".to_string()));
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"hybrid\"");
    }

    #[test]
    fn test_parse_selection_keeps_unknown_and_drops_duplicates() {
        let selected = parse_selection(["greedy", "simulated-annealing", "dp", "greedy"]);
        assert_eq!(
            selected,
            vec![
                Algorithm::Greedy,
                Algorithm::Other("simulated-annealing".to_string()),
                Algorithm::DynamicProgramming,
            ]
        );
    }

    #[test]
    fn test_parse_selection_counts_card_without_id() {
        assert_eq!(parse_selection([""]), vec![Algorithm::Other(String::new())]);
    }

    #[test]
    fn test_parse_selection_empty() {
        let ids: Vec<String> = Vec::new();
        assert!(parse_selection(ids).is_empty());
    }
}
