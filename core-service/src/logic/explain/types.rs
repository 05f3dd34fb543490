use serde::{Deserialize, Serialize};

/// One ranked heuristic contributor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub feature: String,
    pub impact: f64, // heuristic weight, rounded to 2 decimals
    pub value: f64,  // resolved input value
}
