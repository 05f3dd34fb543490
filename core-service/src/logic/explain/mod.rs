//! Explain Module - Heuristic top contributors
//!
//! Fixed weights over a handful of raw readings. No attribution is
//! computed from the model itself.

pub mod engine;
pub mod types;

pub use engine::top_contributors;
pub use types::FeatureContribution;
