//! Scenario Generator - Random telemetry per risk profile
//!
//! Produces `RawRecord`s for demos and smoke tests. Thermal readings scale
//! with the profile's temperature/pressure multipliers and the soft risk
//! indices with its risk multiplier; everything else is drawn uniformly.

use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::features::{RawRecord, Scalar};

const REACTOR_TYPES: [&str; 3] = ["PWR", "BWR", "PHWR"];
const COUNTRIES: [&str; 5] = ["France", "USA", "Japan", "Germany", "China"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Low,
    #[default]
    Moderate,
    High,
    Critical,
}

/// Profile scaling factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multipliers {
    pub temp: f64,
    pub pressure: f64,
    pub risk: f64,
}

impl RiskProfile {
    pub const ALL: [RiskProfile; 4] = [
        RiskProfile::Low,
        RiskProfile::Moderate,
        RiskProfile::High,
        RiskProfile::Critical,
    ];

    pub fn multipliers(self) -> Multipliers {
        match self {
            RiskProfile::Low => Multipliers { temp: 0.8, pressure: 0.85, risk: 0.7 },
            RiskProfile::Moderate => Multipliers { temp: 1.0, pressure: 1.0, risk: 1.0 },
            RiskProfile::High => Multipliers { temp: 1.15, pressure: 1.15, risk: 1.3 },
            RiskProfile::Critical => Multipliers { temp: 1.3, pressure: 1.3, risk: 1.6 },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskProfile::Low => "low",
            RiskProfile::Moderate => "moderate",
            RiskProfile::High => "high",
            RiskProfile::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown risk profile `{0}` (expected low, moderate, high or critical)")]
pub struct UnknownProfileError(pub String);

impl FromStr for RiskProfile {
    type Err = UnknownProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RiskProfile::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownProfileError(s.to_string()))
    }
}

impl std::fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// GENERATION
// ============================================================================

fn num(value: f64) -> Option<Scalar> {
    Some(Scalar::Number(value))
}

/// `floor(uniform[0, span) + offset)`
fn int<R: Rng + ?Sized>(rng: &mut R, span: f64, offset: f64) -> Option<Scalar> {
    num((rng.gen::<f64>() * span).floor() + offset)
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, span: f64) -> Option<Scalar> {
    num(rng.gen::<f64>() * span)
}

fn pick<R: Rng + ?Sized>(rng: &mut R, choices: &[&str]) -> Option<Scalar> {
    Some(Scalar::from(choices[rng.gen_range(0..choices.len())]))
}

pub fn generate<R: Rng + ?Sized>(profile: RiskProfile, rng: &mut R) -> RawRecord {
    let m = profile.multipliers();

    RawRecord {
        reactor_age_years: int(rng, 40.0, 5.0),
        reactor_type_code: pick(rng, &REACTOR_TYPES),
        reactor_nominal_power_mw: int(rng, 2000.0, 500.0),
        load_factor_pct: int(rng, 40.0, 60.0),
        core_temp_c: num(((rng.gen::<f64>() * 80.0 + 270.0) * m.temp).floor()),
        coolant_pressure_bar: num(((rng.gen::<f64>() * 50.0 + 140.0) * m.pressure).floor()),
        neutron_flux: num(rng.gen::<f64>() * 5.0 + 2.0),
        control_rod_position_pct: int(rng, 100.0, 0.0),
        coolant_flow_rate: int(rng, 10_000.0, 15_000.0),
        maintenance_score: uniform(rng, 10.0),
        days_since_maintenance: int(rng, 180.0, 0.0),
        backup_generator_health: uniform(rng, 10.0),
        country: pick(rng, &COUNTRIES),
        ambient_temp_c: int(rng, 40.0, -10.0),
        population_within_30km: int(rng, 500_000.0, 0.0),
        env_risk_index: uniform(rng, 10.0 * m.risk),
        weather_severity_index: uniform(rng, 10.0 * m.risk),
        seismic_activity_index: uniform(rng, 10.0 * m.risk),
        co2_avoided_tons_per_hour: int(rng, 1000.0, 0.0),
        radiation_inside_usv: uniform(rng, 2.0),
        radiation_outside_usv: uniform(rng, 0.5),
        sensor_anomaly_flag: Some(Scalar::Bool(rng.gen::<f64>() > 0.7)),
        cyber_attack_score: uniform(rng, 10.0 * m.risk),
        grid_demand_index: int(rng, 100.0, 0.0),
        market_price_eur_mwh: int(rng, 100.0, 30.0),
        staff_fatigue_index: uniform(rng, 10.0),
        public_anxiety_index: uniform(rng, 10.0 * m.risk),
        social_media_rumour_index: uniform(rng, 10.0 * m.risk),
        regulator_scrutiny_score: uniform(rng, 10.0),
        avalon_raw_risk_score: uniform(rng, 10.0 * m.risk),
        avalon_learned_reward_score: uniform(rng, 10.0),
        ..Default::default()
    }
}

/// Reproducible scenario for a given seed
pub fn generate_seeded(profile: RiskProfile, seed: u64) -> RawRecord {
    generate(profile, &mut StdRng::seed_from_u64(seed))
}

/// Scenario from the thread-local RNG
pub fn generate_random(profile: RiskProfile) -> RawRecord {
    generate(profile, &mut rand::thread_rng())
}
