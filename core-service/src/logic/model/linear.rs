//! Linear Model Artifacts - Logistic regression + standard scaler
//!
//! JSON exports of a fitted binary logistic regression and its standard
//! scaler. Semantics follow the usual fitted-estimator conventions:
//! label = decision function > 0, scaler divides by `scale` (zero → 1).

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use super::classifier::{Classifier, ModelError, Scaler};

// ============================================================================
// LOGISTIC REGRESSION
// ============================================================================

fn default_model_type() -> String {
    "LogisticRegression".to_string()
}

/// On-disk shape of the classifier artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegressionArtifact {
    #[serde(default = "default_model_type")]
    pub model_type: String,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

#[derive(Debug, Clone)]
pub struct LogisticRegressionModel {
    model_type: String,
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LogisticRegressionModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ModelError> {
        Self::from_artifact(LogisticRegressionArtifact {
            model_type: default_model_type(),
            coefficients,
            intercept,
        })
    }

    pub fn from_artifact(artifact: LogisticRegressionArtifact) -> Result<Self, ModelError> {
        if artifact.coefficients.is_empty() {
            return Err(ModelError::InvalidOutput("model has no coefficients".to_string()));
        }
        if !artifact.intercept.is_finite() || artifact.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::InvalidOutput("model parameters must be finite".to_string()));
        }

        Ok(Self {
            model_type: artifact.model_type,
            coefficients: Array1::from(artifact.coefficients),
            intercept: artifact.intercept,
        })
    }

    /// Sigmoid activation function (numerically stable)
    fn sigmoid(z: f64) -> f64 {
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let exp_z = z.exp();
            exp_z / (1.0 + exp_z)
        }
    }

    /// Signed distance to the decision boundary
    pub fn decision_function(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.coefficients.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.coefficients.len(),
                got: features.len(),
            });
        }
        Ok(self.coefficients.dot(&ArrayView1::from(features)) + self.intercept)
    }
}

impl Classifier for LogisticRegressionModel {
    fn model_type(&self) -> &str {
        &self.model_type
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }

    fn predict_label(&self, features: &[f64]) -> Result<bool, ModelError> {
        Ok(self.decision_function(features)? > 0.0)
    }

    fn predict_probabilities(&self, features: &[f64]) -> Result<[f64; 2], ModelError> {
        let p = Self::sigmoid(self.decision_function(features)?);
        Ok([1.0 - p, p])
    }
}

// ============================================================================
// STANDARD SCALER
// ============================================================================

/// On-disk shape of the scaler artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScalerArtifact {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ModelError> {
        Self::from_artifact(StandardScalerArtifact { mean, scale })
    }

    pub fn from_artifact(artifact: StandardScalerArtifact) -> Result<Self, ModelError> {
        if artifact.mean.len() != artifact.scale.len() {
            return Err(ModelError::DimensionMismatch {
                expected: artifact.mean.len(),
                got: artifact.scale.len(),
            });
        }

        // Constant columns were fitted with zero variance
        let scale = Array1::from(artifact.scale).mapv(|s| if s == 0.0 { 1.0 } else { s });

        Ok(Self {
            mean: Array1::from(artifact.mean),
            scale,
        })
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        if features.len() != self.mean.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.mean.len(),
                got: features.len(),
            });
        }

        let scaled = (&ArrayView1::from(features) - &self.mean) / &self.scale;
        Ok(scaled.to_vec())
    }
}
