//! Logic Module - Prediction engines
//!
//! - `features/` - RawRecord → ordered feature vector
//! - `model/` - classifier adapters, artifact store, risk assessment
//! - `incident/` - rule-based incident type
//! - `explain/` - heuristic top contributors
//! - `scenario` - random telemetry per risk profile
//! - `pipeline` - facade tying the above together

pub mod features;
pub mod model;
pub mod incident;
pub mod explain;
pub mod scenario;
pub mod pipeline;
