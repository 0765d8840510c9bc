use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Cost constants for the per-segment matcher. All costs are additive and
/// lower totals rank first; an uninterrupted exact match costs 0.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ScoringWeights {
    /// Cost per skipped character when a gap lands mid-word.
    pub gap_cost: usize,
    /// Flat cost for a gap that lands on a word boundary, regardless of
    /// how many characters were skipped to get there.
    pub boundary_gap_cost: usize,
    /// Added once per query character matched only case-insensitively.
    pub case_penalty: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            gap_cost: 2,
            boundary_gap_cost: 1,
            case_penalty: 4,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Hard cap on returned matches per query.
    pub max_results: usize,
    /// Scope separator rendered between segments of a full name.
    pub separator: String,
    pub weights: ScoringWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 100,
            separator: "::".to_string(),
            weights: ScoringWeights::default(),
        }
    }
}

impl SearchConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_fills_defaults() {
        let config = SearchConfig::from_json(r#"{"max_results": 25}"#).unwrap();
        assert_eq!(config.max_results, 25);
        assert_eq!(config.separator, "::");
        assert_eq!(config.weights, ScoringWeights::default());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(SearchConfig::from_json("not json").is_err());
    }
}
