//! Router tests
//!
//! Drive the full router (layers included) with `tower::ServiceExt::oneshot`
//! against an in-memory model.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use reactor_risk_core::logic::features::FeatureSchema;
use reactor_risk_core::logic::model::{
    ArtifactLoadError, ArtifactLoader, ArtifactStore, Classifier, LoadedClassifier, ModelError, Scaler,
};
use reactor_risk_core::{FeatureBuilder, PredictionPipeline};
use serde_json::Value;
use tower::ServiceExt;

use crate::{create_router, AppState};

/// Incident probability rises with core temperature
struct TempClassifier;

impl Classifier for TempClassifier {
    fn model_type(&self) -> &str {
        "TempClassifier"
    }

    fn predict_label(&self, features: &[f64]) -> Result<bool, ModelError> {
        Ok(self.predict_probabilities(features)?[1] > 0.5)
    }

    fn predict_probabilities(&self, features: &[f64]) -> Result<[f64; 2], ModelError> {
        let core_temp = features.first().copied().unwrap_or_default();
        let p = if core_temp > 320.0 { 0.7 } else { 0.1 };
        Ok([1.0 - p, p])
    }
}

/// Classifier that always returns garbage
struct BrokenClassifier;

impl Classifier for BrokenClassifier {
    fn model_type(&self) -> &str {
        "Broken"
    }

    fn predict_label(&self, _features: &[f64]) -> Result<bool, ModelError> {
        Ok(false)
    }

    fn predict_probabilities(&self, _features: &[f64]) -> Result<[f64; 2], ModelError> {
        Err(ModelError::Runtime("session poisoned".to_string()))
    }
}

enum Model {
    Temp,
    Broken,
    Missing,
}

struct TestLoader(Model);

impl ArtifactLoader for TestLoader {
    fn source(&self) -> &str {
        "test"
    }

    fn load_classifier(&self) -> Result<LoadedClassifier, ArtifactLoadError> {
        let model: Box<dyn Classifier> = match self.0 {
            Model::Temp => Box::new(TempClassifier),
            Model::Broken => Box::new(BrokenClassifier),
            Model::Missing => {
                return Err(ArtifactLoadError::NotFound {
                    component: "classifier",
                    path: "model/model.json".to_string(),
                })
            }
        };
        Ok(LoadedClassifier { model, path: None, checksum: None })
    }

    fn load_scaler(&self) -> Result<Option<Box<dyn Scaler>>, ArtifactLoadError> {
        Ok(None)
    }

    fn load_feature_schema(&self) -> Result<Option<FeatureSchema>, ArtifactLoadError> {
        let names = ["core_temp_c", "coolant_pressure_bar", "high_core_temp"];
        Ok(FeatureSchema::new(names.iter().map(|s| s.to_string()).collect()).ok())
    }
}

fn app(model: Model) -> Router {
    let pipeline = PredictionPipeline::new(ArtifactStore::new(TestLoader(model)), FeatureBuilder::default());
    create_router(AppState { pipeline: Arc::new(pipeline) })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_predict(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(Model::Temp), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_i64());
}

#[tokio::test]
async fn test_predict_normal() {
    let (status, body) = send(app(Model::Temp), post_predict(r#"{"core_temp_c": 290}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["incident_occurred"], false);
    assert_eq!(body["incident_probability"], 0.1);
    assert_eq!(body["confidence"], 0.9);
    assert_eq!(body["true_risk_level"], 0);
    assert_eq!(body["incident_type"], "Normal Operation");
    assert_eq!(body["model_metadata"]["model_type"], "TempClassifier");
    assert_eq!(body["model_metadata"]["using_feature_names"], true);
}

#[tokio::test]
async fn test_predict_overheat() {
    let (status, body) = send(
        app(Model::Temp),
        post_predict(r#"{"core_temp_c": 325, "avalon_shutdown_recommendation": true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["incident_occurred"], true);
    assert_eq!(body["true_risk_level"], 2);
    assert_eq!(body["incident_type"], "Core Overheat");
    assert_eq!(body["avalon_shutdown_recommendation"], true);
    assert_eq!(body["top_contributors"][0]["feature"], "core_temp_c");
}

#[tokio::test]
async fn test_predict_rejects_missing_input() {
    for payload in ["", "null", "{}", "[1, 2]", "{\"core_temp_c\":"] {
        let (status, body) = send(app(Model::Temp), post_predict(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{:?}", payload);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_predict_invalid_value_is_server_error() {
    let (status, body) = send(app(Model::Temp), post_predict(r#"{"coolant_flow_rate": "fast"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("coolant_flow_rate"));
}

#[tokio::test]
async fn test_predict_model_failure() {
    let (status, body) = send(app(Model::Broken), post_predict(r#"{"core_temp_c": 300}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("session poisoned"));

    let (status, body) = send(app(Model::Missing), post_predict(r#"{"core_temp_c": 300}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("classifier"));
}

#[tokio::test]
async fn test_model_info() {
    let (status, body) = send(app(Model::Temp), get("/api/model-info")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["n_features"], 3);
    assert_eq!(body["feature_names"][0], "core_temp_c");
    assert_eq!(body["scaler_loaded"], false);

    let (status, body) = send(app(Model::Missing), get("/api/model-info")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["model_loaded"], false);
}

#[tokio::test]
async fn test_scenario() {
    let (status, first) = send(app(Model::Temp), get("/api/scenario?profile=critical&seed=9")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(first["core_temp_c"].as_f64().unwrap() >= 351.0);
    assert!(first.get("radiation_inside_uSv").is_some());

    let (_, second) = send(app(Model::Temp), get("/api/scenario?profile=critical&seed=9")).await;
    assert_eq!(first, second);

    let (status, _) = send(app(Model::Temp), get("/api/scenario?profile=meltdown")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
