//! ONNX Classifier - ONNX Runtime backend
//!
//! Loads a converted binary classifier exported with a label output and a
//! dense probability output (no zipmap).

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::classifier::{Classifier, ModelError};

/// Output names used by converted scikit-learn classifiers
const LABEL_OUTPUT: &str = "label";
const PROBABILITY_OUTPUT: &str = "probabilities";

pub struct OnnxClassifier {
    session: Mutex<Session>,
    n_features: Option<usize>,
}

impl OnnxClassifier {
    pub fn from_bytes(model_bytes: &[u8], n_features: Option<usize>) -> Result<Self, ModelError> {
        log::info!("Loading ONNX classifier from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| ModelError::Runtime(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Runtime(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| ModelError::Runtime(format!("Load from memory error: {}", e)))?;

        Ok(Self {
            session: Mutex::new(session),
            n_features,
        })
    }

    fn run(&self, features: &[f64]) -> Result<(Option<bool>, [f64; 2]), ModelError> {
        if let Some(expected) = self.n_features {
            if features.len() != expected {
                return Err(ModelError::DimensionMismatch { expected, got: features.len() });
            }
        }

        let row: Vec<f32> = features.iter().map(|v| *v as f32).collect();
        let input_array = Array2::<f32>::from_shape_vec((1, row.len()), row)
            .map_err(|e| ModelError::Runtime(format!("Array error: {}", e)))?;
        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ModelError::Runtime(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ModelError::Runtime(format!("Inference failed: {}", e)))?;

        let probabilities = outputs
            .get(PROBABILITY_OUTPUT)
            .ok_or_else(|| ModelError::InvalidOutput(format!("missing `{}` output", PROBABILITY_OUTPUT)))?
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::InvalidOutput(format!("Extract error: {}", e)))?
            .1;
        if probabilities.len() < 2 {
            return Err(ModelError::InvalidOutput(format!(
                "expected 2 class probabilities, got {}",
                probabilities.len()
            )));
        }
        let pair = [probabilities[0] as f64, probabilities[1] as f64];

        let label = outputs
            .get(LABEL_OUTPUT)
            .and_then(|output| output.try_extract_tensor::<i64>().ok())
            .and_then(|tensor| tensor.1.first().copied())
            .map(|label| label != 0);

        Ok((label, pair))
    }
}

impl Classifier for OnnxClassifier {
    fn model_type(&self) -> &str {
        "onnx"
    }

    fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    fn predict_label(&self, features: &[f64]) -> Result<bool, ModelError> {
        let (label, [_, p1]) = self.run(features)?;
        Ok(label.unwrap_or(p1 > 0.5))
    }

    fn predict_probabilities(&self, features: &[f64]) -> Result<[f64; 2], ModelError> {
        Ok(self.run(features)?.1)
    }
}
