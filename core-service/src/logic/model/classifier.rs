//! Classifier & Scaler capabilities
//!
//! The trained model is opaque to the pipeline: anything that can label a
//! feature vector and give a two-class probability distribution qualifies.

use thiserror::Error;

/// Absolute tolerance for `p0 + p1 == 1`
pub const PROBABILITY_TOLERANCE: f64 = 1e-4;

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Failure raised by a classifier or scaler implementation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Invalid model output: {0}")]
    InvalidOutput(String),

    #[error("Model runtime error: {0}")]
    Runtime(String),
}

/// Where in the pipeline a model capability failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scaling,
    Classification,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Scaling => f.write_str("scaling"),
            Stage::Classification => f.write_str("classification"),
        }
    }
}

/// Scaler or classifier invocation failed; carries the original cause
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Prediction failed during {stage}: {cause}")]
pub struct PredictionFailure {
    pub stage: Stage,
    #[source]
    pub cause: ModelError,
}

impl PredictionFailure {
    pub fn scaling(cause: ModelError) -> Self {
        Self { stage: Stage::Scaling, cause }
    }

    pub fn classification(cause: ModelError) -> Self {
        Self { stage: Stage::Classification, cause }
    }
}

// ============================================================================
// CAPABILITY TRAITS
// ============================================================================

/// Trained binary classifier (0 = no incident, 1 = incident)
pub trait Classifier: Send + Sync {
    /// Short type name reported in model metadata
    fn model_type(&self) -> &str;

    /// Input width the model was fitted on, when known
    fn n_features(&self) -> Option<usize> {
        None
    }

    fn predict_label(&self, features: &[f64]) -> Result<bool, ModelError>;

    /// `[p_no_incident, p_incident]`
    fn predict_probabilities(&self, features: &[f64]) -> Result<[f64; 2], ModelError>;
}

/// Pure feature transform applied before classification
pub trait Scaler: Send + Sync {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// Reject probability pairs that are not a distribution
pub fn validate_probabilities(probabilities: [f64; 2]) -> Result<[f64; 2], ModelError> {
    let [p0, p1] = probabilities;
    let in_range = |p: f64| p.is_finite() && (-PROBABILITY_TOLERANCE..=1.0 + PROBABILITY_TOLERANCE).contains(&p);

    if !in_range(p0) || !in_range(p1) {
        return Err(ModelError::InvalidOutput(format!(
            "probabilities out of range: [{}, {}]",
            p0, p1
        )));
    }
    if ((p0 + p1) - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(ModelError::InvalidOutput(format!(
            "probabilities do not sum to 1: [{}, {}]",
            p0, p1
        )));
    }

    Ok([p0.clamp(0.0, 1.0), p1.clamp(0.0, 1.0)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_probabilities() {
        assert_eq!(validate_probabilities([0.9, 0.1]), Ok([0.9, 0.1]));
        assert!(validate_probabilities([0.5, 0.6]).is_err());
        assert!(validate_probabilities([f64::NAN, 1.0]).is_err());
        assert!(validate_probabilities([-0.5, 1.5]).is_err());
    }

    #[test]
    fn test_failure_message_keeps_cause() {
        let failure = PredictionFailure::classification(ModelError::Runtime("session lost".to_string()));
        let message = failure.to_string();
        assert!(message.contains("classification"));
        assert!(message.contains("session lost"));
        assert!(std::error::Error::source(&failure).is_some());
    }
}
