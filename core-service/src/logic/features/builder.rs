//! Feature Builder - RawRecord → FeatureVector
//!
//! Order of extraction only matters for reproducibility; the final column
//! order always comes from the schema (or alphabetical order without one).

use super::categorical::{CountryEncoding, DecadeEncoding, ReactorTypeEncoding};
use super::engineered::{CompositeScores, DerivedFeatures, RiskIndicators, TemporalFeatures};
use super::layout::FeatureSchema;
use super::record::{InvalidInputError, RawRecord, ReactorSnapshot};
use super::vector::{FeatureExtractor, FeatureMap, FeatureVector};
use crate::constants::DEFAULT_YEAR;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureBuilder {
    /// Year used when the record carries none
    pub year_default: f64,
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self { year_default: DEFAULT_YEAR }
    }
}

impl FeatureBuilder {
    pub fn new(year_default: f64) -> Self {
        Self { year_default }
    }

    /// Resolve the record and build a vector matching `schema`
    pub fn build(
        &self,
        raw: &RawRecord,
        schema: Option<&FeatureSchema>,
    ) -> Result<FeatureVector, InvalidInputError> {
        let snapshot = raw.resolve()?;
        Ok(self.build_snapshot(&snapshot, schema))
    }

    /// Build from an already-resolved snapshot
    pub fn build_snapshot(&self, snapshot: &ReactorSnapshot, schema: Option<&FeatureSchema>) -> FeatureVector {
        let features = self.compute(snapshot);

        match schema {
            Some(schema) => FeatureVector::from_schema(&features, schema),
            None => {
                log::warn!("Feature schema not available, using alphabetical feature order");
                FeatureVector::sorted(features)
            }
        }
    }

    /// Every feature the builder knows how to compute, keyed by name
    pub fn compute(&self, snapshot: &ReactorSnapshot) -> FeatureMap {
        let year = snapshot.year.unwrap_or(self.year_default);

        let mut features: FeatureMap = snapshot
            .base_features()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();

        let extractors: [&dyn FeatureExtractor; 7] = [
            &DerivedFeatures,
            &CompositeScores,
            &TemporalFeatures { year },
            &RiskIndicators,
            &CountryEncoding,
            &ReactorTypeEncoding,
            &DecadeEncoding { year },
        ];
        for extractor in extractors {
            extractor.extract(snapshot, &mut features);
        }

        features
    }

    /// Column names of the schema-less (alphabetical) layout
    pub fn default_layout(&self) -> Vec<String> {
        self.compute(&ReactorSnapshot::default()).into_keys().collect()
    }
}
