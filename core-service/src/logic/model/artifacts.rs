//! Model Artifacts - Loading & process-wide cache
//!
//! Classifier, optional scaler and optional feature schema are loaded once
//! and shared by every request. A missing classifier is fatal; a missing or
//! unreadable scaler/schema only degrades the pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::constants;
use crate::logic::features::FeatureSchema;

use super::classifier::{Classifier, Scaler};
use super::linear::{
    LogisticRegressionArtifact, LogisticRegressionModel, StandardScaler, StandardScalerArtifact,
};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Artifact components, used to name the failing piece
pub const CLASSIFIER: &str = "classifier";
pub const SCALER: &str = "scaler";
pub const FEATURE_SCHEMA: &str = "feature schema";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArtifactLoadError {
    #[error("Failed to load {component}: file not found at {path}")]
    NotFound { component: &'static str, path: String },

    #[error("Failed to load {component} from {path}: {reason}")]
    Io {
        component: &'static str,
        path: String,
        reason: String,
    },

    #[error("Failed to parse {component}: {reason}")]
    Parse { component: &'static str, reason: String },

    #[error("Invalid {component}: {reason}")]
    Invalid { component: &'static str, reason: String },

    #[error("Checksum mismatch for {component}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        component: &'static str,
        expected: String,
        actual: String,
    },
}

impl ArtifactLoadError {
    pub fn component(&self) -> &'static str {
        match self {
            Self::NotFound { component, .. }
            | Self::Io { component, .. }
            | Self::Parse { component, .. }
            | Self::Invalid { component, .. }
            | Self::ChecksumMismatch { component, .. } => component,
        }
    }
}

// ============================================================================
// LOADER CONTRACT
// ============================================================================

/// Classifier plus where it came from
pub struct LoadedClassifier {
    pub model: Box<dyn Classifier>,
    pub path: Option<String>,
    pub checksum: Option<String>,
}

/// Source of trained artifacts
///
/// `Ok(None)` from the optional loaders means the artifact is simply not
/// provided; `Err` means it exists but could not be used.
pub trait ArtifactLoader: Send + Sync {
    /// Short origin name reported in model metadata
    fn source(&self) -> &str;

    fn load_classifier(&self) -> Result<LoadedClassifier, ArtifactLoadError>;

    fn load_scaler(&self) -> Result<Option<Box<dyn Scaler>>, ArtifactLoadError>;

    fn load_feature_schema(&self) -> Result<Option<FeatureSchema>, ArtifactLoadError>;
}

// ============================================================================
// FILE LOADER
// ============================================================================

/// Artifact locations on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub feature_names: PathBuf,
    /// Hex SHA-256 the classifier file must match
    pub expected_checksum: Option<String>,
}

impl ArtifactPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(constants::DEFAULT_MODEL_FILE),
            scaler: dir.join(constants::DEFAULT_SCALER_FILE),
            feature_names: dir.join(constants::DEFAULT_FEATURE_NAMES_FILE),
            expected_checksum: None,
        }
    }

    pub fn from_env() -> Self {
        Self {
            model: constants::get_model_path(),
            scaler: constants::get_scaler_path(),
            feature_names: constants::get_feature_names_path(),
            expected_checksum: constants::get_expected_checksum(),
        }
    }

    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.expected_checksum = Some(checksum.into());
        self
    }
}

/// Hex-encoded SHA-256 of a byte slice
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn read_artifact(component: &'static str, path: &Path) -> Result<Option<Vec<u8>>, ArtifactLoadError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ArtifactLoadError::Io {
            component,
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(
    component: &'static str,
    bytes: &[u8],
) -> Result<T, ArtifactLoadError> {
    serde_json::from_slice(bytes).map_err(|e| ArtifactLoadError::Parse {
        component,
        reason: e.to_string(),
    })
}

/// Loads JSON (or, with the `onnx` feature, ONNX) artifacts from disk
#[derive(Debug, Clone)]
pub struct FileArtifactLoader {
    paths: ArtifactPaths,
}

impl FileArtifactLoader {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self { paths }
    }

    pub fn from_env() -> Self {
        Self::new(ArtifactPaths::from_env())
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    fn is_onnx(&self) -> bool {
        self.paths
            .model
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("onnx"))
    }

    fn build_classifier(&self, bytes: &[u8]) -> Result<Box<dyn Classifier>, ArtifactLoadError> {
        if self.is_onnx() {
            return self.build_onnx(bytes);
        }

        let artifact: LogisticRegressionArtifact = parse_json(CLASSIFIER, bytes)?;
        let model = LogisticRegressionModel::from_artifact(artifact).map_err(|e| ArtifactLoadError::Invalid {
            component: CLASSIFIER,
            reason: e.to_string(),
        })?;
        Ok(Box::new(model))
    }

    #[cfg(feature = "onnx")]
    fn build_onnx(&self, bytes: &[u8]) -> Result<Box<dyn Classifier>, ArtifactLoadError> {
        let model = super::onnx::OnnxClassifier::from_bytes(bytes, None).map_err(|e| ArtifactLoadError::Invalid {
            component: CLASSIFIER,
            reason: e.to_string(),
        })?;
        Ok(Box::new(model))
    }

    #[cfg(not(feature = "onnx"))]
    fn build_onnx(&self, _bytes: &[u8]) -> Result<Box<dyn Classifier>, ArtifactLoadError> {
        Err(ArtifactLoadError::Invalid {
            component: CLASSIFIER,
            reason: "ONNX models require the `onnx` feature".to_string(),
        })
    }
}

impl ArtifactLoader for FileArtifactLoader {
    fn source(&self) -> &str {
        "file"
    }

    fn load_classifier(&self) -> Result<LoadedClassifier, ArtifactLoadError> {
        let path = &self.paths.model;
        log::info!("Loading classifier from: {}", path.display());

        let bytes = read_artifact(CLASSIFIER, path)?.ok_or_else(|| ArtifactLoadError::NotFound {
            component: CLASSIFIER,
            path: path.display().to_string(),
        })?;

        let checksum = sha256_hex(&bytes);
        if let Some(expected) = &self.paths.expected_checksum {
            if !expected.eq_ignore_ascii_case(&checksum) {
                return Err(ArtifactLoadError::ChecksumMismatch {
                    component: CLASSIFIER,
                    expected: expected.clone(),
                    actual: checksum,
                });
            }
        }
        log::debug!("Classifier sha256: {}", checksum);

        Ok(LoadedClassifier {
            model: self.build_classifier(&bytes)?,
            path: Some(path.display().to_string()),
            checksum: Some(checksum),
        })
    }

    fn load_scaler(&self) -> Result<Option<Box<dyn Scaler>>, ArtifactLoadError> {
        let Some(bytes) = read_artifact(SCALER, &self.paths.scaler)? else {
            return Ok(None);
        };

        let artifact: StandardScalerArtifact = parse_json(SCALER, &bytes)?;
        let scaler = StandardScaler::from_artifact(artifact).map_err(|e| ArtifactLoadError::Invalid {
            component: SCALER,
            reason: e.to_string(),
        })?;
        Ok(Some(Box::new(scaler)))
    }

    fn load_feature_schema(&self) -> Result<Option<FeatureSchema>, ArtifactLoadError> {
        let Some(bytes) = read_artifact(FEATURE_SCHEMA, &self.paths.feature_names)? else {
            return Ok(None);
        };

        parse_json(FEATURE_SCHEMA, &bytes).map(Some)
    }
}

// ============================================================================
// LOADED ARTIFACTS
// ============================================================================

/// Description of the loaded model set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_type: String,
    pub model_source: String,
    pub model_path: Option<String>,
    pub n_features: Option<usize>,
    pub using_scaler: bool,
    pub using_feature_names: bool,
    pub layout_hash: Option<u32>,
    pub checksum: Option<String>,
    pub loaded_at: DateTime<Utc>,
}

pub struct ModelArtifacts {
    pub classifier: Box<dyn Classifier>,
    pub scaler: Option<Box<dyn Scaler>>,
    pub schema: Option<FeatureSchema>,
    pub metadata: ModelMetadata,
}

impl ModelArtifacts {
    pub fn scaler(&self) -> Option<&dyn Scaler> {
        self.scaler.as_deref()
    }

    pub fn schema(&self) -> Option<&FeatureSchema> {
        self.schema.as_ref()
    }
}

impl std::fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifacts")
            .field("metadata", &self.metadata)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// ARTIFACT STORE
// ============================================================================

/// Load-once holder; concurrent first callers block until the single load
/// finishes and then all observe the same outcome.
pub struct ArtifactStore {
    loader: Box<dyn ArtifactLoader>,
    cell: OnceCell<Result<Arc<ModelArtifacts>, ArtifactLoadError>>,
}

impl ArtifactStore {
    pub fn new(loader: impl ArtifactLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            cell: OnceCell::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(FileArtifactLoader::from_env())
    }

    /// Loaded artifacts, loading them on first use
    pub fn get(&self) -> Result<Arc<ModelArtifacts>, ArtifactLoadError> {
        self.cell.get_or_init(|| self.load()).clone()
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.cell.get(), Some(Ok(_)))
    }

    fn load(&self) -> Result<Arc<ModelArtifacts>, ArtifactLoadError> {
        let classifier = self.loader.load_classifier().map_err(|e| {
            log::error!("{}", e);
            e
        })?;

        let scaler = self.loader.load_scaler().unwrap_or_else(|e| {
            log::warn!("{}; continuing without scaler", e);
            None
        });
        if scaler.is_none() {
            log::warn!("Scaler not available, features will not be scaled");
        }

        let schema = self.loader.load_feature_schema().unwrap_or_else(|e| {
            log::warn!("{}; continuing without feature schema", e);
            None
        });

        let n_features = classifier.model.n_features();
        if let (Some(schema), Some(expected)) = (&schema, n_features) {
            if let Err(e) = schema.check_dimension(expected) {
                log::warn!("{}", e);
            }
        }

        let metadata = ModelMetadata {
            model_type: classifier.model.model_type().to_string(),
            model_source: self.loader.source().to_string(),
            model_path: classifier.path,
            n_features,
            using_scaler: scaler.is_some(),
            using_feature_names: schema.is_some(),
            layout_hash: schema.as_ref().map(FeatureSchema::layout_hash),
            checksum: classifier.checksum,
            loaded_at: Utc::now(),
        };

        log::info!(
            "Model artifacts loaded: type={}, scaler={}, feature_names={}",
            metadata.model_type,
            metadata.using_scaler,
            metadata.using_feature_names
        );

        Ok(Arc::new(ModelArtifacts {
            classifier: classifier.model,
            scaler,
            schema,
            metadata,
        }))
    }
}
