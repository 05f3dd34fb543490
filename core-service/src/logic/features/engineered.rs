//! Engineered Features - Products, ratios, composites, time and thresholds
//!
//! Replicates the transformations applied when the classifier was trained.
//! Every value is computed from the resolved snapshot, never from the
//! output of another extractor.

use super::layout::RATIO_EPSILON;
use super::record::ReactorSnapshot;
use super::vector::{indicator, FeatureExtractor, FeatureMap};

// ============================================================================
// THRESHOLDS (strict inequalities)
// ============================================================================

pub const MAINTENANCE_OVERDUE_DAYS: f64 = 180.0;
pub const POOR_MAINTENANCE_SCORE: f64 = 50.0;
pub const OLD_REACTOR_YEARS: f64 = 40.0;
pub const HIGH_CORE_TEMP_C: f64 = 320.0;
pub const HIGH_RADIATION_INSIDE_USV: f64 = 50.0;
pub const LOW_COOLANT_FLOW: f64 = 3000.0;
pub const HIGH_CONTROL_ROD_PCT: f64 = 80.0;

/// First year counted by `years_since_1991`
pub const EPOCH_YEAR: f64 = 1991.0;
/// `is_recent` holds from this year on
pub const RECENT_YEAR: f64 = 2020.0;

fn put(features: &mut FeatureMap, name: &str, value: f64) {
    features.insert(name.to_string(), value);
}

// ============================================================================
// EXTRACTORS
// ============================================================================

/// Pairwise products and ratios
pub struct DerivedFeatures;

impl FeatureExtractor for DerivedFeatures {
    fn extract(&self, s: &ReactorSnapshot, features: &mut FeatureMap) {
        put(features, "core_temp_x_pressure", s.core_temp_c * s.coolant_pressure_bar);
        put(features, "neutron_x_temp", s.neutron_flux * s.core_temp_c);
        put(features, "age_x_maintenance", s.reactor_age_years * s.days_since_maintenance);
        put(
            features,
            "radiation_inside_outside_ratio",
            s.radiation_inside_usv / (s.radiation_outside_usv + RATIO_EPSILON),
        );
        put(features, "load_factor_normalized", s.load_factor_pct / 100.0);
        put(
            features,
            "maintenance_per_day",
            s.maintenance_score / (s.days_since_maintenance + 1.0),
        );
    }
}

/// Unweighted means of technical, social and environmental attributes
pub struct CompositeScores;

impl FeatureExtractor for CompositeScores {
    fn extract(&self, s: &ReactorSnapshot, features: &mut FeatureMap) {
        put(
            features,
            "technical_risk_score",
            (s.core_temp_c + s.coolant_pressure_bar + s.neutron_flux + s.radiation_inside_usv) / 4.0,
        );
        put(
            features,
            "social_pressure_score",
            (s.public_anxiety_index + s.social_media_rumour_index + s.regulator_scrutiny_score) / 3.0,
        );
        put(
            features,
            "environmental_threat_score",
            (s.env_risk_index + s.weather_severity_index + s.seismic_activity_index) / 3.0,
        );
    }
}

/// Year offsets; `year` is already resolved by the builder
pub struct TemporalFeatures {
    pub year: f64,
}

impl FeatureExtractor for TemporalFeatures {
    fn extract(&self, _s: &ReactorSnapshot, features: &mut FeatureMap) {
        put(features, "years_since_1991", self.year - EPOCH_YEAR);
        put(features, "is_recent", indicator(self.year >= RECENT_YEAR));
    }
}

/// Binary risk indicators
pub struct RiskIndicators;

impl FeatureExtractor for RiskIndicators {
    fn extract(&self, s: &ReactorSnapshot, features: &mut FeatureMap) {
        let overdue = s.days_since_maintenance > MAINTENANCE_OVERDUE_DAYS;
        let poor = s.maintenance_score < POOR_MAINTENANCE_SCORE;
        put(features, "maintenance_overdue", indicator(overdue));
        put(features, "poor_maintenance", indicator(poor));
        put(features, "maintenance_risk", indicator(overdue || poor));

        put(features, "old_reactor", indicator(s.reactor_age_years > OLD_REACTOR_YEARS));

        let hot = s.core_temp_c > HIGH_CORE_TEMP_C;
        let radiation = s.radiation_inside_usv > HIGH_RADIATION_INSIDE_USV;
        let low_flow = s.coolant_flow_rate < LOW_COOLANT_FLOW;
        let rods = s.control_rod_position_pct > HIGH_CONTROL_ROD_PCT;
        put(features, "high_core_temp", indicator(hot));
        put(features, "high_radiation_inside", indicator(radiation));
        put(features, "low_coolant_flow", indicator(low_flow));
        put(features, "high_control_rod", indicator(rods));
        put(features, "operational_stress", indicator(hot || radiation || low_flow || rods));
    }
}

// ============================================================================
// TESTS
// ============================================================================
