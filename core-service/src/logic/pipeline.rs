//! Prediction Pipeline - RawRecord → PredictionReport
//!
//! Owns the artifact store and the feature builder. Shared by reference
//! (or `Arc`) across request handlers; all state behind it is read-only
//! once artifacts are loaded, apart from the inference counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;
use crate::logic::explain::FeatureContribution;
use crate::logic::features::{FeatureBuilder, InvalidInputError, RawRecord};
use crate::logic::incident::IncidentType;
use crate::logic::model::{
    assess_with_thresholds, ArtifactLoadError, ArtifactStore, ModelMetadata, PredictionFailure, RiskThresholds,
    RiskTier,
};

/// Feature names echoed by `model_info`
pub const MODEL_INFO_FEATURE_PREVIEW: usize = 10;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Artifact(#[from] ArtifactLoadError),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    Prediction(#[from] PredictionFailure),
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Model description attached to every report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub model_type: String,
    pub model_source: String,
    pub model_path: Option<String>,
    pub n_features: Option<usize>,
    pub using_scaler: bool,
    pub using_feature_names: bool,
    pub is_real_model: bool,
}

impl From<&ModelMetadata> for ReportMetadata {
    fn from(meta: &ModelMetadata) -> Self {
        Self {
            model_type: meta.model_type.clone(),
            model_source: meta.model_source.clone(),
            model_path: meta.model_path.clone(),
            n_features: meta.n_features,
            using_scaler: meta.using_scaler,
            using_feature_names: meta.using_feature_names,
            is_real_model: true,
        }
    }
}

/// Boundary-facing prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub incident_occurred: bool,
    pub incident_probability: f64,
    pub confidence: f64,
    pub true_risk_level: RiskTier,
    pub avalon_evac_recommendation: bool,
    pub avalon_shutdown_recommendation: bool,
    pub human_override: bool,
    pub top_contributors: Vec<FeatureContribution>,
    pub incident_type: IncidentType,
    pub model_metadata: ReportMetadata,
}

/// Inference counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InferenceStats {
    pub inference_count: u64,
    pub failure_count: u64,
    pub avg_latency_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub model_loaded: bool,
    pub n_features: usize,
    pub feature_names: Vec<String>,
    pub scaler_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_features_in_model: Option<usize>,
    pub layout_hash: String,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
    pub stats: InferenceStats,
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round_ties_even() / 1000.0
}

// ============================================================================
// PIPELINE
// ============================================================================

pub struct PredictionPipeline {
    store: ArtifactStore,
    builder: FeatureBuilder,
    thresholds: RiskThresholds,
    inference_count: AtomicU64,
    failure_count: AtomicU64,
    latency_sum_us: AtomicU64,
}

impl PredictionPipeline {
    pub fn new(store: ArtifactStore, builder: FeatureBuilder) -> Self {
        Self {
            store,
            builder,
            thresholds: RiskThresholds::default(),
            inference_count: AtomicU64::new(0),
            failure_count: AtomicU64::new(0),
            latency_sum_us: AtomicU64::new(0),
        }
    }

    /// Artifacts and year default from the environment
    pub fn from_env() -> Self {
        Self::new(
            ArtifactStore::from_env(),
            FeatureBuilder::new(constants::get_default_year()),
        )
    }

    pub fn with_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn builder(&self) -> &FeatureBuilder {
        &self.builder
    }

    /// Load artifacts now instead of on the first request
    pub fn warm_up(&self) -> Result<(), ArtifactLoadError> {
        self.store.get().map(|_| ())
    }

    pub fn is_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    pub fn predict(&self, raw: &RawRecord) -> Result<PredictionReport, PipelineError> {
        let start_time = Instant::now();
        let result = self.run(raw);

        match &result {
            Ok(_) => {
                self.inference_count.fetch_add(1, Ordering::Relaxed);
                self.latency_sum_us
                    .fetch_add(start_time.elapsed().as_micros() as u64, Ordering::Relaxed);
            }
            Err(e) => {
                self.failure_count.fetch_add(1, Ordering::Relaxed);
                log::error!("Prediction failed: {}", e);
            }
        }

        result
    }

    fn run(&self, raw: &RawRecord) -> Result<PredictionReport, PipelineError> {
        let artifacts = self.store.get()?;
        let snapshot = raw.resolve()?;
        let vector = self.builder.build_snapshot(&snapshot, artifacts.schema());
        log::trace!("Feature vector: {}", vector.to_log_entry());

        let result = assess_with_thresholds(
            &snapshot,
            &vector,
            &*artifacts.classifier,
            artifacts.scaler(),
            &self.thresholds,
        )?;

        Ok(PredictionReport {
            incident_occurred: result.incident_predicted,
            incident_probability: round3(result.incident_probability),
            confidence: round3(result.confidence),
            true_risk_level: result.risk_tier,
            avalon_evac_recommendation: snapshot.avalon_evac_recommendation,
            avalon_shutdown_recommendation: snapshot.avalon_shutdown_recommendation,
            human_override: snapshot.human_override,
            top_contributors: result.top_contributors,
            incident_type: result.incident_type,
            model_metadata: ReportMetadata::from(&artifacts.metadata),
        })
    }

    pub fn model_info(&self) -> Result<ModelInfo, ArtifactLoadError> {
        let artifacts = self.store.get()?;

        let names = match artifacts.schema() {
            Some(schema) => schema.names().to_vec(),
            None => self.builder.default_layout(),
        };

        Ok(ModelInfo {
            model_type: artifacts.metadata.model_type.clone(),
            model_loaded: true,
            n_features: names.len(),
            feature_names: names.iter().take(MODEL_INFO_FEATURE_PREVIEW).cloned().collect(),
            scaler_loaded: artifacts.metadata.using_scaler,
            n_features_in_model: artifacts.metadata.n_features,
            layout_hash: format!("{:08x}", crate::logic::features::layout::compute_layout_hash(&names)),
            loaded_at: artifacts.metadata.loaded_at,
            stats: self.stats(),
        })
    }

    pub fn stats(&self) -> InferenceStats {
        let count = self.inference_count.load(Ordering::Relaxed);
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f64 / count as f64) / 1000.0 } else { 0.0 };

        InferenceStats {
            inference_count: count,
            failure_count: self.failure_count.load(Ordering::Relaxed),
            avg_latency_ms: avg,
        }
    }
}
