//! Feature Vector - Core data structure for ML input
//!
//! **Named, ordered feature vector with layout hash**
//!
//! Extractors write into a `FeatureMap`; the map is then reconciled against
//! the trained `FeatureSchema` (exact columns, exact order, missing = 0) or,
//! without a schema, laid out alphabetically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::layout::{compute_layout_hash, FeatureSchema};
use super::record::ReactorSnapshot;

/// Every computed feature keyed by name
pub type FeatureMap = BTreeMap<String, f64>;

/// Encode a boolean as a 0/1 feature value
pub fn indicator(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

// ============================================================================
// FEATURE VECTOR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// CRC32 hash of `names` (for mismatch detection)
    pub layout_hash: u32,
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Reindex against the schema: its columns, its order, missing = 0
    pub fn from_schema(features: &FeatureMap, schema: &FeatureSchema) -> Self {
        let values = schema
            .names()
            .iter()
            .map(|name| features.get(name).copied().unwrap_or(0.0))
            .collect();

        Self {
            layout_hash: schema.layout_hash(),
            names: schema.names().to_vec(),
            values,
        }
    }

    /// Every computed column in lexicographic order
    pub fn sorted(features: FeatureMap) -> Self {
        let (names, values): (Vec<String>, Vec<f64>) = features.into_iter().unzip();
        Self {
            layout_hash: compute_layout_hash(&names),
            names,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|i| self.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names.iter().map(String::as_str).zip(self.values.iter().copied())
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "layout_hash": format!("{:08x}", self.layout_hash),
            "feature_count": self.len(),
            "named_values": self.iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect::<BTreeMap<_, _>>(),
        })
    }
}

// ============================================================================
// FEATURE EXTRACTOR TRAIT
// ============================================================================

/// Trait for feature extractors
pub trait FeatureExtractor {
    /// Compute features from the resolved snapshot and add them to the map
    fn extract(&self, snapshot: &ReactorSnapshot, features: &mut FeatureMap);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> FeatureMap {
        let mut map = FeatureMap::new();
        map.insert("zeta".to_string(), 3.0);
        map.insert("alpha".to_string(), 1.0);
        map.insert("Mu".to_string(), 2.0);
        map
    }

    #[test]
    fn test_sorted_layout() {
        let vector = FeatureVector::sorted(sample_map());
        // Byte order: uppercase before lowercase
        assert_eq!(vector.names(), ["Mu", "alpha", "zeta"]);
        assert_eq!(vector.as_slice(), [2.0, 1.0, 3.0]);
        assert_eq!(vector.layout_hash, compute_layout_hash(vector.names()));
    }

    #[test]
    fn test_from_schema_fills_and_drops() {
        let schema = FeatureSchema::new(vec![
            "zeta".to_string(),
            "missing".to_string(),
            "alpha".to_string(),
        ])
        .unwrap();

        let vector = FeatureVector::from_schema(&sample_map(), &schema);
        assert_eq!(vector.names(), schema.names());
        assert_eq!(vector.as_slice(), [3.0, 0.0, 1.0]);
        assert_eq!(vector.get_by_name("Mu"), None);
        assert_eq!(vector.layout_hash, schema.layout_hash());
    }

    #[test]
    fn test_to_log_entry() {
        let vector = FeatureVector::sorted(sample_map());
        let log = vector.to_log_entry();
        assert_eq!(log["feature_count"], 3);
        assert_eq!(log["named_values"]["alpha"], 1.0);
    }
}
