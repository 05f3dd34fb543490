//! Reactor Risk Prediction Server
//!
//! Thin HTTP boundary over `reactor_risk_core::PredictionPipeline`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  REACTOR RISK SERVER                     │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐      ┌──────────────────────────────────┐ │
//! │  │  Router   │ ───► │  spawn_blocking                  │ │
//! │  │  (Axum)   │      │  PredictionPipeline (core)       │ │
//! │  └───────────┘      └────────────────┬─────────────────┘ │
//! │                                      ▼                   │
//! │                         ┌──────────────────────┐         │
//! │                         │ model/ artifacts     │         │
//! │                         └──────────────────────┘         │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod config;
mod handlers;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use reactor_risk_core::logic::model::{ArtifactStore, FileArtifactLoader};
use reactor_risk_core::{FeatureBuilder, PredictionPipeline};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();

    // Initialize logging (core `log` records are bridged in by tracing-subscriber)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "reactor_risk_server=debug,reactor_risk_core=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();

    tracing::info!("Reactor Risk server starting ({})...", config.environment);
    tracing::info!("Model: {}", config.artifacts.model.display());

    let pipeline = PredictionPipeline::new(
        ArtifactStore::new(FileArtifactLoader::new(config.artifacts.clone())),
        FeatureBuilder::new(config.default_year),
    );
    let pipeline = Arc::new(pipeline);

    if config.preload_model {
        let warm = pipeline.clone();
        match tokio::task::spawn_blocking(move || warm.warm_up()).await? {
            Ok(()) => tracing::info!("Model artifacts loaded"),
            Err(e) if config.is_production() => return Err(e).context("Failed to load model artifacts"),
            Err(e) => tracing::warn!("Model artifacts unavailable: {}", e),
        }
    }

    // Build application state
    let state = AppState { pipeline };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PredictionPipeline>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/predict", post(handlers::predict::predict))
        .route("/api/model-info", get(handlers::model_info::get))
        .route("/api/scenario", get(handlers::scenario::generate))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

#[cfg(test)]
mod tests;
