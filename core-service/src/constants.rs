//! Central Configuration Constants
//!
//! Single source of truth for artifact locations and pipeline defaults.
//! Environment variables override every value here.

use std::path::PathBuf;

/// Default directory holding the trained model artifacts
pub const DEFAULT_MODEL_DIR: &str = "model";

/// Classifier artifact file name (JSON logistic regression)
pub const DEFAULT_MODEL_FILE: &str = "model.json";

/// Scaler artifact file name (JSON standard scaler)
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";

/// Feature order artifact file name (JSON array of names)
pub const DEFAULT_FEATURE_NAMES_FILE: &str = "feature_names.json";

/// Year assumed when a record carries none
pub const DEFAULT_YEAR: f64 = 2025.0;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model directory from environment or use default
pub fn get_model_dir() -> PathBuf {
    std::env::var("MODEL_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_DIR))
}

/// Get classifier path from environment or derive it from the model directory
pub fn get_model_path() -> PathBuf {
    std::env::var("MODEL_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| get_model_dir().join(DEFAULT_MODEL_FILE))
}

/// Get scaler path from environment or derive it from the model directory
pub fn get_scaler_path() -> PathBuf {
    std::env::var("SCALER_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| get_model_dir().join(DEFAULT_SCALER_FILE))
}

/// Get feature names path from environment or derive it from the model directory
pub fn get_feature_names_path() -> PathBuf {
    std::env::var("FEATURE_NAMES_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| get_model_dir().join(DEFAULT_FEATURE_NAMES_FILE))
}

/// Expected SHA-256 of the classifier artifact, if pinned
pub fn get_expected_checksum() -> Option<String> {
    std::env::var("MODEL_SHA256")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Get default year from environment or use default
pub fn get_default_year() -> f64 {
    std::env::var("DEFAULT_YEAR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_YEAR)
}
