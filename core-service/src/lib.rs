//! Reactor Risk Core
//!
//! Feature engineering and risk scoring for reactor telemetry snapshots.
//! `logic::pipeline::PredictionPipeline` is the entry point; everything
//! else is exposed for tests and alternative front-ends.

pub mod constants;
pub mod logic;

pub use logic::features::{FeatureBuilder, FeatureSchema, RawRecord};
pub use logic::pipeline::{ModelInfo, PipelineError, PredictionPipeline, PredictionReport};
pub use logic::scenario::RiskProfile;
