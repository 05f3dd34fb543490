//! Configuration module

use std::env;

use reactor_risk_core::constants;
use reactor_risk_core::logic::model::ArtifactPaths;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Classifier, scaler and feature-name locations
    pub artifacts: ArtifactPaths,

    /// Year assumed for records without one
    pub default_year: f64,

    /// Load artifacts at startup instead of on the first request
    pub preload_model: bool,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            artifacts: ArtifactPaths::from_env(),

            default_year: constants::get_default_year(),

            preload_model: env::var("PRELOAD_MODEL")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
