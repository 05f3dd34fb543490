//! Risk Tier Thresholds
//!
//! Discretizes the incident probability into four tiers. Bounds are
//! inclusive on the lower side: 0.25 is Medium, 0.5 is High, 0.75 is
//! Critical.

use serde::{Deserialize, Serialize};

/// Discrete risk tier (serialized as 0-3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RiskTier {
    Low = 0,
    Medium = 1,
    High = 2,
    Critical = 3,
}

impl RiskTier {
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
            RiskTier::Critical => "Critical",
        }
    }
}

impl From<RiskTier> for u8 {
    fn from(tier: RiskTier) -> Self {
        tier.level()
    }
}

impl TryFrom<u8> for RiskTier {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(RiskTier::Low),
            1 => Ok(RiskTier::Medium),
            2 => Ok(RiskTier::High),
            3 => Ok(RiskTier::Critical),
            other => Err(format!("risk tier out of range: {}", other)),
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier boundaries on the incident probability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium: 0.25,
            high: 0.5,
            critical: 0.75,
        }
    }
}

impl RiskThresholds {
    pub fn tier(&self, probability: f64) -> RiskTier {
        if probability < self.medium {
            RiskTier::Low
        } else if probability < self.high {
            RiskTier::Medium
        } else if probability < self.critical {
            RiskTier::High
        } else {
            RiskTier::Critical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        let thresholds = RiskThresholds::default();
        assert_eq!(thresholds.tier(0.0), RiskTier::Low);
        assert_eq!(thresholds.tier(0.2499), RiskTier::Low);
        assert_eq!(thresholds.tier(0.25), RiskTier::Medium);
        assert_eq!(thresholds.tier(0.4999), RiskTier::Medium);
        assert_eq!(thresholds.tier(0.5), RiskTier::High);
        assert_eq!(thresholds.tier(0.7499), RiskTier::High);
        assert_eq!(thresholds.tier(0.75), RiskTier::Critical);
        assert_eq!(thresholds.tier(1.0), RiskTier::Critical);
    }

    #[test]
    fn test_tier_serializes_as_level() {
        assert_eq!(serde_json::to_string(&RiskTier::High).unwrap(), "2");
        assert_eq!(serde_json::from_str::<RiskTier>("3").unwrap(), RiskTier::Critical);
        assert!(serde_json::from_str::<RiskTier>("4").is_err());
    }
}
