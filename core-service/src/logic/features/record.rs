//! Raw Record - Loosely-typed telemetry input and its resolved snapshot
//!
//! `RawRecord` mirrors the JSON object received at the boundary: every
//! attribute is optional and may be a number, boolean or string.
//! `RawRecord::resolve` applies the default table once and produces a
//! fully-typed `ReactorSnapshot`; nothing downstream looks at raw scalars.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::reactor_type::ReactorType;
use super::vector::indicator;

/// Country assumed when a record carries none
pub const DEFAULT_COUNTRY: &str = "France";

// ============================================================================
// SCALAR
// ============================================================================

/// A single attribute value as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
    /// Arrays and objects; kept so coercion can name the offending field
    Other(serde_json::Value),
}

impl Scalar {
    /// Render as a category label (country names, etc.)
    pub fn as_label(&self) -> String {
        match self {
            Scalar::Text(s) => s.clone(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Other(v) => v.to_string(),
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Text(s) => write!(f, "{:?}", s),
            other => write!(f, "{}", other.as_label()),
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value as f64)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// A supplied value could not be coerced to its expected type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid value for field `{field}`: {value}")]
pub struct InvalidInputError {
    pub field: String,
    pub value: String,
}

impl InvalidInputError {
    fn new(field: &str, value: &Scalar) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

// ============================================================================
// COERCION
// ============================================================================

fn coerce_number(field: &str, value: Option<&Scalar>) -> Result<Option<f64>, InvalidInputError> {
    let Some(scalar) = value else {
        return Ok(None);
    };

    let number = match scalar {
        Scalar::Number(n) => Some(*n),
        Scalar::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Scalar::Text(s) => s.trim().parse::<f64>().ok(),
        Scalar::Other(_) => None,
    };

    match number {
        Some(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(InvalidInputError::new(field, scalar)),
    }
}

fn coerce_flag(field: &str, value: Option<&Scalar>) -> Result<Option<bool>, InvalidInputError> {
    let Some(scalar) = value else {
        return Ok(None);
    };

    let flag = match scalar {
        Scalar::Bool(b) => Some(*b),
        Scalar::Number(n) if n.is_finite() => Some(*n != 0.0),
        Scalar::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    };

    flag.map(Some).ok_or_else(|| InvalidInputError::new(field, scalar))
}

// ============================================================================
// RECORD LAYOUT
// ============================================================================

/// Declares the base attributes once and derives `RawRecord`,
/// `ReactorSnapshot`, the default table and the accessors from it.
macro_rules! reactor_attributes {
    (
        numeric { $( $num:ident => $num_key:tt = $num_default:expr, )* }
        flags { $( $flag:ident => $flag_key:tt, )* }
    ) => {
        /// Telemetry snapshot as received; every attribute optional
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct RawRecord {
            $(
                #[serde(rename = $num_key, default, skip_serializing_if = "Option::is_none")]
                pub $num: Option<Scalar>,
            )*
            $(
                #[serde(rename = $flag_key, default, skip_serializing_if = "Option::is_none")]
                pub $flag: Option<Scalar>,
            )*
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub country: Option<Scalar>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub reactor_type_code: Option<Scalar>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub year: Option<Scalar>,
        }

        /// Resolved record: supplied values or documented defaults
        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub struct ReactorSnapshot {
            $( pub $num: f64, )*
            $( pub $flag: bool, )*
            pub country: String,
            pub reactor_type: ReactorType,
            /// `None` lets the feature builder apply its year default
            pub year: Option<f64>,
        }

        /// Numeric base attributes and their "normal operation" defaults
        pub const NUMERIC_DEFAULTS: &[(&str, f64)] = &[
            $( ($num_key, $num_default), )*
        ];

        /// Boolean base attributes (default false, encoded as 0/1)
        pub const FLAG_FIELDS: &[&str] = &[
            $( $flag_key, )*
        ];

        impl RawRecord {
            /// Apply the default table and coerce every supplied value
            pub fn resolve(&self) -> Result<ReactorSnapshot, InvalidInputError> {
                Ok(ReactorSnapshot {
                    $( $num: coerce_number($num_key, self.$num.as_ref())?.unwrap_or($num_default), )*
                    $( $flag: coerce_flag($flag_key, self.$flag.as_ref())?.unwrap_or(false), )*
                    country: self.country
                        .as_ref()
                        .map(Scalar::as_label)
                        .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
                    reactor_type: self.reactor_type_code
                        .as_ref()
                        .map(ReactorType::from_scalar)
                        .unwrap_or_default(),
                    year: coerce_number("year", self.year.as_ref())?,
                })
            }
        }

        impl ReactorSnapshot {
            /// Base features in declaration order, flags as 0/1
            pub fn base_features(&self) -> Vec<(&'static str, f64)> {
                let mut features = Vec::with_capacity(NUMERIC_DEFAULTS.len() + FLAG_FIELDS.len());
                $( features.push(($num_key, self.$num)); )*
                $( features.push(($flag_key, indicator(self.$flag))); )*
                features
            }

            /// Look up a base feature by its wire name
            pub fn value_of(&self, name: &str) -> Option<f64> {
                match name {
                    $( $num_key => Some(self.$num), )*
                    $( $flag_key => Some(indicator(self.$flag)), )*
                    _ => None,
                }
            }
        }

        impl Default for ReactorSnapshot {
            fn default() -> Self {
                Self {
                    $( $num: $num_default, )*
                    $( $flag: false, )*
                    country: DEFAULT_COUNTRY.to_string(),
                    reactor_type: ReactorType::default(),
                    year: None,
                }
            }
        }
    };
}

reactor_attributes! {
    numeric {
        reactor_age_years => "reactor_age_years" = 20.0,
        reactor_nominal_power_mw => "reactor_nominal_power_mw" = 1000.0,
        load_factor_pct => "load_factor_pct" = 75.0,
        population_within_30km => "population_within_30km" = 100_000.0,
        ambient_temp_c => "ambient_temp_c" = 15.0,
        co2_avoided_tons_per_hour => "co2_avoided_tons_per_hour" = 500.0,
        core_temp_c => "core_temp_c" = 285.0,
        coolant_pressure_bar => "coolant_pressure_bar" = 155.0,
        neutron_flux => "neutron_flux" = 500.0,
        control_rod_position_pct => "control_rod_position_pct" = 20.0,
        coolant_flow_rate => "coolant_flow_rate" = 5000.0,
        radiation_inside_usv => "radiation_inside_uSv" = 10.0,
        radiation_outside_usv => "radiation_outside_uSv" = 0.1,
        maintenance_score => "maintenance_score" = 80.0,
        days_since_maintenance => "days_since_maintenance" = 90.0,
        grid_demand_index => "grid_demand_index" = 50.0,
        market_price_eur_mwh => "market_price_eur_mwh" = 50.0,
        backup_generator_health => "backup_generator_health" = 90.0,
        staff_fatigue_index => "staff_fatigue_index" = 30.0,
        public_anxiety_index => "public_anxiety_index" = 20.0,
        social_media_rumour_index => "social_media_rumour_index" = 10.0,
        regulator_scrutiny_score => "regulator_scrutiny_score" = 30.0,
        env_risk_index => "env_risk_index" = 20.0,
        weather_severity_index => "weather_severity_index" = 15.0,
        seismic_activity_index => "seismic_activity_index" = 10.0,
        cyber_attack_score => "cyber_attack_score" = 5.0,
        avalon_raw_risk_score => "avalon_raw_risk_score" = 30.0,
        avalon_learned_reward_score => "avalon_learned_reward_score" = 40.0,
        true_risk_level => "true_risk_level" = 0.0,
    }
    flags {
        sensor_anomaly_flag => "sensor_anomaly_flag",
        avalon_evac_recommendation => "avalon_evac_recommendation",
        avalon_shutdown_recommendation => "avalon_shutdown_recommendation",
        human_override => "human_override",
    }
}

impl RawRecord {
    /// Parse a JSON object into a record; unknown keys are ignored
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

// ============================================================================
// TESTS
// ============================================================================
