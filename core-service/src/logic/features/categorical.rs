//! Categorical Features - One-hot expansion
//!
//! Unknown categories produce all-zero columns; there is no "unknown"
//! bucket and no error. Baselines (PWR, the 1990s) emit no column.

use super::layout::{
    country_column, decade_column, reactor_type_column, INDICATOR_DECADES, KNOWN_COUNTRIES,
};
use super::reactor_type::ReactorType;
use super::record::ReactorSnapshot;
use super::vector::{indicator, FeatureExtractor, FeatureMap};

/// Decade bucket: floor(year / 10) * 10
pub fn decade_of(year: f64) -> i64 {
    ((year / 10.0).floor() * 10.0) as i64
}

pub struct CountryEncoding;

impl FeatureExtractor for CountryEncoding {
    fn extract(&self, s: &ReactorSnapshot, features: &mut FeatureMap) {
        for country in KNOWN_COUNTRIES {
            features.insert(country_column(country), indicator(s.country == *country));
        }
    }
}

pub struct ReactorTypeEncoding;

impl FeatureExtractor for ReactorTypeEncoding {
    fn extract(&self, s: &ReactorSnapshot, features: &mut FeatureMap) {
        for reactor_type in ReactorType::ALL.into_iter().filter(|t| !t.is_baseline()) {
            features.insert(
                reactor_type_column(reactor_type.code()),
                indicator(s.reactor_type == reactor_type),
            );
        }
    }
}

pub struct DecadeEncoding {
    pub year: f64,
}

impl FeatureExtractor for DecadeEncoding {
    fn extract(&self, _s: &ReactorSnapshot, features: &mut FeatureMap) {
        let decade = decade_of(self.year);
        for candidate in INDICATOR_DECADES {
            features.insert(decade_column(candidate), indicator(decade == candidate));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hot_columns(features: &FeatureMap, prefix: &str) -> Vec<String> {
        features
            .iter()
            .filter(|(name, value)| name.starts_with(prefix) && **value == 1.0)
            .map(|(name, _)| name.clone())
            .collect()
    }

    #[test]
    fn test_decade_of() {
        assert_eq!(decade_of(1999.0), 1990);
        assert_eq!(decade_of(2000.0), 2000);
        assert_eq!(decade_of(2025.0), 2020);
        assert_eq!(decade_of(2019.9), 2010);
    }

    #[test]
    fn test_country_known_and_unknown() {
        let mut features = FeatureMap::new();
        CountryEncoding.extract(&ReactorSnapshot::default(), &mut features);
        assert_eq!(features.len(), KNOWN_COUNTRIES.len());
        assert_eq!(hot_columns(&features, "country_"), ["country_France"]);

        for unknown in ["USA", "france", "United  Kingdom", ""] {
            let snapshot = ReactorSnapshot {
                country: unknown.to_string(),
                ..Default::default()
            };
            let mut features = FeatureMap::new();
            CountryEncoding.extract(&snapshot, &mut features);
            assert!(hot_columns(&features, "country_").is_empty(), "{}", unknown);
        }
    }

    #[test]
    fn test_reactor_type_columns() {
        let mut features = FeatureMap::new();
        ReactorTypeEncoding.extract(&ReactorSnapshot::default(), &mut features);
        assert_eq!(features.len(), 3);
        assert!(hot_columns(&features, "reactor_type_").is_empty());

        let snapshot = ReactorSnapshot {
            reactor_type: ReactorType::Gcr,
            ..Default::default()
        };
        let mut features = FeatureMap::new();
        ReactorTypeEncoding.extract(&snapshot, &mut features);
        assert_eq!(hot_columns(&features, "reactor_type_"), ["reactor_type_4"]);
    }

    #[test]
    fn test_decade_columns() {
        let mut features = FeatureMap::new();
        DecadeEncoding { year: 1995.0 }.extract(&ReactorSnapshot::default(), &mut features);
        assert_eq!(features.len(), 3);
        assert!(hot_columns(&features, "decade_").is_empty());

        let mut features = FeatureMap::new();
        DecadeEncoding { year: 2012.0 }.extract(&ReactorSnapshot::default(), &mut features);
        assert_eq!(hot_columns(&features, "decade_"), ["decade_2010"]);
    }
}
