use serde::{Deserialize, Serialize};

/// Rule-based incident category, independent of the model output except
/// for the `GeneralSafetyConcern` fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentType {
    #[serde(rename = "Core Overheat")]
    CoreOverheat,
    #[serde(rename = "Coolant Overpressure")]
    CoolantOverpressure,
    #[serde(rename = "Radiation Leak")]
    RadiationLeak,
    #[serde(rename = "Coolant System Failure")]
    CoolantSystemFailure,
    #[serde(rename = "General Safety Concern")]
    GeneralSafetyConcern,
    #[serde(rename = "Normal Operation")]
    NormalOperation,
}

impl IncidentType {
    pub fn label(self) -> &'static str {
        match self {
            IncidentType::CoreOverheat => "Core Overheat",
            IncidentType::CoolantOverpressure => "Coolant Overpressure",
            IncidentType::RadiationLeak => "Radiation Leak",
            IncidentType::CoolantSystemFailure => "Coolant System Failure",
            IncidentType::GeneralSafetyConcern => "General Safety Concern",
            IncidentType::NormalOperation => "Normal Operation",
        }
    }
}

impl std::fmt::Display for IncidentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
