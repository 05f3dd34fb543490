//! Model Module - Classifier adapters & risk assessment
//!
//! The trained model stays behind the `Classifier` / `Scaler` traits so
//! the JSON linear model and the ONNX session are interchangeable.

pub mod classifier;
pub mod linear;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod artifacts;
pub mod threshold;
pub mod inference;

// Re-export common types
pub use artifacts::{
    ArtifactLoadError, ArtifactLoader, ArtifactPaths, ArtifactStore, FileArtifactLoader, LoadedClassifier,
    ModelArtifacts, ModelMetadata,
};
pub use classifier::{Classifier, ModelError, PredictionFailure, Scaler, Stage};
pub use inference::{assess, assess_with_thresholds, PredictionResult};
pub use linear::{LogisticRegressionModel, StandardScaler};
pub use threshold::{RiskThresholds, RiskTier};
