//! Inference - Risk assessment
//!
//! Scale (if a scaler is loaded), classify, then derive tier, incident
//! type and heuristic contributors. No retries: the first scaler or
//! classifier error is returned with its stage.

use serde::{Deserialize, Serialize};

use crate::logic::explain::{top_contributors, FeatureContribution};
use crate::logic::features::{FeatureVector, ReactorSnapshot};
use crate::logic::incident::{self, IncidentType};

use super::classifier::{validate_probabilities, Classifier, ModelError, PredictionFailure, Scaler};
use super::threshold::{RiskThresholds, RiskTier};

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub incident_predicted: bool,
    pub incident_probability: f64, // p(incident), 0.0 - 1.0
    pub confidence: f64,           // max class probability
    pub risk_tier: RiskTier,
    pub top_contributors: Vec<FeatureContribution>,
    pub incident_type: IncidentType,
    pub scaled: bool,
}

pub fn assess(
    snapshot: &ReactorSnapshot,
    vector: &FeatureVector,
    classifier: &dyn Classifier,
    scaler: Option<&dyn Scaler>,
) -> Result<PredictionResult, PredictionFailure> {
    assess_with_thresholds(snapshot, vector, classifier, scaler, &RiskThresholds::default())
}

pub fn assess_with_thresholds(
    snapshot: &ReactorSnapshot,
    vector: &FeatureVector,
    classifier: &dyn Classifier,
    scaler: Option<&dyn Scaler>,
    thresholds: &RiskThresholds,
) -> Result<PredictionResult, PredictionFailure> {
    let scaled_values;
    let input: &[f64] = match scaler {
        Some(scaler) => {
            scaled_values = scaler.transform(vector.as_slice()).map_err(PredictionFailure::scaling)?;
            if scaled_values.len() != vector.len() {
                return Err(PredictionFailure::scaling(ModelError::DimensionMismatch {
                    expected: vector.len(),
                    got: scaled_values.len(),
                }));
            }
            &scaled_values
        }
        None => {
            log::warn!("Scaler not loaded, classifying unscaled features (layout {:08x})", vector.layout_hash);
            vector.as_slice()
        }
    };

    let incident_predicted = classifier.predict_label(input).map_err(PredictionFailure::classification)?;
    let [p_normal, p_incident] = classifier
        .predict_probabilities(input)
        .and_then(validate_probabilities)
        .map_err(PredictionFailure::classification)?;

    let result = PredictionResult {
        incident_predicted,
        incident_probability: p_incident,
        confidence: p_normal.max(p_incident),
        risk_tier: thresholds.tier(p_incident),
        top_contributors: top_contributors(snapshot),
        incident_type: incident::classify(snapshot, incident_predicted),
        scaled: scaler.is_some(),
    };

    log::debug!(
        "Assessment: incident={}, p={:.4}, tier={}, type={}",
        result.incident_predicted,
        result.incident_probability,
        result.risk_tier,
        result.incident_type
    );

    Ok(result)
}
