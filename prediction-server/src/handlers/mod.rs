//! HTTP handlers

pub mod health;
pub mod predict;
pub mod model_info;
pub mod scenario;
