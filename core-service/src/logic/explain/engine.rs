use super::types::FeatureContribution;
use crate::logic::features::ReactorSnapshot;

/// Number of contributors reported
pub const TOP_CONTRIBUTORS: usize = 3;

// Heuristic weights, each roughly normalized to 0..1 over the operating range.
// Not a model attribution: the ranking only says which raw readings look
// furthest from safe.
type WeightFn = fn(&ReactorSnapshot) -> (f64, f64);

static FEATURE_WEIGHTS: [(&str, WeightFn); 7] = [
    ("core_temp_c", |s| (s.core_temp_c / 400.0, s.core_temp_c)),
    ("coolant_pressure_bar", |s| (s.coolant_pressure_bar / 200.0, s.coolant_pressure_bar)),
    ("maintenance_score", |s| ((100.0 - s.maintenance_score) / 100.0, s.maintenance_score)),
    ("neutron_flux", |s| (s.neutron_flux / 1000.0, s.neutron_flux)),
    ("radiation_inside_uSv", |s| (s.radiation_inside_usv / 100.0, s.radiation_inside_usv)),
    ("cyber_attack_score", |s| (s.cyber_attack_score / 100.0, s.cyber_attack_score)),
    ("staff_fatigue_index", |s| (s.staff_fatigue_index / 100.0, s.staff_fatigue_index)),
];

/// Halves go to the even neighbour
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Top contributors by heuristic impact, highest first
///
/// Ties keep table order (stable sort).
pub fn top_contributors(snapshot: &ReactorSnapshot) -> Vec<FeatureContribution> {
    let mut contributions: Vec<(&str, f64, f64)> = FEATURE_WEIGHTS
        .iter()
        .map(|(name, weigh)| {
            let (impact, value) = weigh(snapshot);
            (*name, impact, value)
        })
        .collect();

    // Sort by impact DESC
    contributions.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    contributions
        .into_iter()
        .take(TOP_CONTRIBUTORS)
        .map(|(feature, impact, value)| FeatureContribution {
            feature: feature.to_string(),
            impact: round2(impact),
            value,
        })
        .collect()
}
