//! Incident Module - Incident type rules
//!
//! First matching rule wins; rules read the resolved raw readings, not
//! engineered features.

pub mod types;

pub use types::IncidentType;

use crate::logic::features::engineered::{HIGH_CORE_TEMP_C, HIGH_RADIATION_INSIDE_USV, LOW_COOLANT_FLOW};
use crate::logic::features::ReactorSnapshot;

/// Coolant pressure above which the loop counts as overpressured
pub const HIGH_COOLANT_PRESSURE_BAR: f64 = 170.0;

pub fn classify(snapshot: &ReactorSnapshot, incident_predicted: bool) -> IncidentType {
    if snapshot.core_temp_c > HIGH_CORE_TEMP_C {
        IncidentType::CoreOverheat
    } else if snapshot.coolant_pressure_bar > HIGH_COOLANT_PRESSURE_BAR {
        IncidentType::CoolantOverpressure
    } else if snapshot.radiation_inside_usv > HIGH_RADIATION_INSIDE_USV {
        IncidentType::RadiationLeak
    } else if snapshot.coolant_flow_rate < LOW_COOLANT_FLOW {
        IncidentType::CoolantSystemFailure
    } else if incident_predicted {
        IncidentType::GeneralSafetyConcern
    } else {
        IncidentType::NormalOperation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(edit: impl FnOnce(&mut ReactorSnapshot)) -> ReactorSnapshot {
        let mut s = ReactorSnapshot::default();
        edit(&mut s);
        s
    }

    #[test]
    fn test_normal_and_model_fallback() {
        let s = ReactorSnapshot::default();
        assert_eq!(classify(&s, false), IncidentType::NormalOperation);
        assert_eq!(classify(&s, true), IncidentType::GeneralSafetyConcern);
    }

    #[test]
    fn test_rule_priority() {
        let s = snapshot(|s| {
            s.core_temp_c = 330.0;
            s.coolant_pressure_bar = 180.0;
        });
        assert_eq!(classify(&s, false), IncidentType::CoreOverheat);

        let s = snapshot(|s| {
            s.coolant_pressure_bar = 180.0;
            s.radiation_inside_usv = 60.0;
        });
        assert_eq!(classify(&s, false), IncidentType::CoolantOverpressure);

        let s = snapshot(|s| {
            s.radiation_inside_usv = 60.0;
            s.coolant_flow_rate = 100.0;
        });
        assert_eq!(classify(&s, true), IncidentType::RadiationLeak);

        let s = snapshot(|s| s.coolant_flow_rate = 2999.0);
        assert_eq!(classify(&s, true), IncidentType::CoolantSystemFailure);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let s = snapshot(|s| {
            s.core_temp_c = 320.0;
            s.coolant_pressure_bar = 170.0;
            s.radiation_inside_usv = 50.0;
            s.coolant_flow_rate = 3000.0;
        });
        assert_eq!(classify(&s, false), IncidentType::NormalOperation);
    }

    #[test]
    fn test_label_serialization() {
        assert_eq!(
            serde_json::to_string(&IncidentType::CoolantSystemFailure).unwrap(),
            "\"Coolant System Failure\""
        );
        assert_eq!(IncidentType::CoreOverheat.to_string(), "Core Overheat");
    }
}
