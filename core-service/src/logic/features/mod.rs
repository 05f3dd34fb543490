//! Features Module - Feature Engineering Engine
//!
//! Turns a loosely-typed telemetry record into the fixed-order numeric
//! vector the classifier was trained on.
//!
//! - `record` - RawRecord, defaults, coercion
//! - `reactor_type` - closed reactor type enum
//! - `engineered` / `categorical` - feature extractors
//! - `layout` - column names, known categories, FeatureSchema
//! - `vector` - FeatureVector and schema reconciliation
//! - `builder` - orchestrates the steps above

pub mod record;
pub mod reactor_type;
pub mod layout;
pub mod vector;
pub mod engineered;
pub mod categorical;
pub mod builder;


// Re-export common types
pub use builder::FeatureBuilder;
pub use layout::{FeatureSchema, LayoutMismatchError};
pub use reactor_type::ReactorType;
pub use record::{InvalidInputError, RawRecord, ReactorSnapshot, Scalar};
pub use vector::{FeatureExtractor, FeatureMap, FeatureVector};
