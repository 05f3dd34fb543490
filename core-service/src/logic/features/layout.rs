//! Feature Layout - Column names and the trained feature schema
//!
//! **The classifier's feature schema is authoritative for column order.**
//!
//! This module owns:
//! - the names of every engineered column the builder can emit
//! - the known category lists for one-hot expansion
//! - `FeatureSchema`, the ordered name list loaded with the model
//! - CRC32 layout hashes used to spot schema drift in logs

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// ENGINEERED COLUMNS
// ============================================================================

/// Added to `radiation_outside_uSv` before dividing
pub const RATIO_EPSILON: f64 = 1e-5;

/// Pairwise products and ratios of base attributes
pub const DERIVED_FEATURES: &[&str] = &[
    "core_temp_x_pressure",
    "neutron_x_temp",
    "age_x_maintenance",
    "radiation_inside_outside_ratio",
    "load_factor_normalized",
    "maintenance_per_day",
];

/// Unweighted means over small groups of base attributes
pub const COMPOSITE_FEATURES: &[&str] = &[
    "technical_risk_score",
    "social_pressure_score",
    "environmental_threat_score",
];

pub const TEMPORAL_FEATURES: &[&str] = &["years_since_1991", "is_recent"];

/// Binary threshold indicators
pub const INDICATOR_FEATURES: &[&str] = &[
    "maintenance_overdue",
    "poor_maintenance",
    "maintenance_risk",
    "old_reactor",
    "high_core_temp",
    "high_radiation_inside",
    "low_coolant_flow",
    "high_control_rod",
    "operational_stress",
];

// ============================================================================
// CATEGORIES
// ============================================================================

/// Countries with an indicator column; exact spelling is significant
pub const KNOWN_COUNTRIES: &[&str] = &[
    "Belgium", "Bulgaria", "Croatia", "Cyprus", "Czech Republic", "Denmark",
    "Estonia", "Finland", "France", "Germany", "Greece", "Hungary", "Ireland",
    "Italy", "Latvia", "Lithuania", "Luxembourg", "Malta", "Netherlands",
    "Norway", "Poland", "Portugal", "Romania", "Slovakia", "Slovenia", "Spain",
    "Sweden", "Switzerland", "Ukraine", "United Kingdom",
];

pub const COUNTRY_PREFIX: &str = "country_";
pub const REACTOR_TYPE_PREFIX: &str = "reactor_type_";
pub const DECADE_PREFIX: &str = "decade_";

/// Decades with an indicator column; the 1990s are the baseline
pub const INDICATOR_DECADES: [i64; 3] = [2000, 2010, 2020];

pub fn country_column(country: &str) -> String {
    format!("{}{}", COUNTRY_PREFIX, country)
}

pub fn reactor_type_column(code: u8) -> String {
    format!("{}{}", REACTOR_TYPE_PREFIX, code)
}

pub fn decade_column(decade: i64) -> String {
    format!("{}{}", DECADE_PREFIX, decade)
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of an ordered list of feature names
pub fn compute_layout_hash<S: AsRef<str>>(names: &[S]) -> u32 {
    let mut hasher = Hasher::new();

    for name in names {
        hasher.update(name.as_ref().as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// FEATURE SCHEMA
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Feature schema must list at least one feature")]
pub struct EmptySchemaError;

/// Ordered feature names the classifier was trained against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSchema {
    names: Vec<String>,
    hash: u32,
}

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Result<Self, EmptySchemaError> {
        if names.is_empty() {
            return Err(EmptySchemaError);
        }
        let hash = compute_layout_hash(&names);
        Ok(Self { names, hash })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn layout_hash(&self) -> u32 {
        self.hash
    }

    /// Get feature index by name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Check the schema against the classifier's input width
    pub fn check_dimension(&self, expected: usize) -> Result<(), LayoutMismatchError> {
        if self.len() != expected {
            return Err(LayoutMismatchError {
                expected,
                actual: self.len(),
                hash: self.hash,
            });
        }
        Ok(())
    }
}

impl TryFrom<Vec<String>> for FeatureSchema {
    type Error = EmptySchemaError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<FeatureSchema> for Vec<String> {
    fn from(schema: FeatureSchema) -> Self {
        schema.names
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when the schema width doesn't match the classifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Feature layout mismatch: classifier expects {expected} features, schema (hash: {hash:08x}) lists {actual}")]
pub struct LayoutMismatchError {
    pub expected: usize,
    pub actual: usize,
    pub hash: u32,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_known_country_count() {
        assert_eq!(KNOWN_COUNTRIES.len(), 30);
        assert!(KNOWN_COUNTRIES.contains(&"Czech Republic"));
    }

    #[test]
    fn test_layout_hash_consistency() {
        let a = compute_layout_hash(&names(&["a", "b"]));
        let b = compute_layout_hash(&names(&["a", "b"]));
        assert_eq!(a, b);
        assert_ne!(a, 0);
    }

    #[test]
    fn test_layout_hash_order_sensitive() {
        let forward = compute_layout_hash(&names(&["a", "b"]));
        let reversed = compute_layout_hash(&names(&["b", "a"]));
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_layout_hash_separator() {
        // "ab" + "c" must not collide with "a" + "bc"
        let left = compute_layout_hash(&names(&["ab", "c"]));
        let right = compute_layout_hash(&names(&["a", "bc"]));
        assert_ne!(left, right);
    }

    #[test]
    fn test_schema_rejects_empty() {
        assert_eq!(FeatureSchema::new(Vec::new()), Err(EmptySchemaError));
        assert!(serde_json::from_str::<FeatureSchema>("[]").is_err());
    }

    #[test]
    fn test_schema_from_json() {
        let schema: FeatureSchema = serde_json::from_str(r#"["core_temp_c", "is_recent"]"#).unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.position("is_recent"), Some(1));
        assert_eq!(schema.position("nonexistent"), None);
        assert_eq!(schema.layout_hash(), compute_layout_hash(schema.names()));
    }

    #[test]
    fn test_check_dimension() {
        let schema = FeatureSchema::new(names(&["a", "b", "c"])).unwrap();
        assert!(schema.check_dimension(3).is_ok());

        let err = schema.check_dimension(4).unwrap_err();
        assert_eq!(err.expected, 4);
        assert_eq!(err.actual, 3);
    }
}
