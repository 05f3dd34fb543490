//! Model info handler

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

/// Describe the loaded model; a failed load answers 500 with `model_loaded: false`
pub async fn get(State(state): State<AppState>) -> impl IntoResponse {
    let pipeline = state.pipeline.clone();
    let info = tokio::task::spawn_blocking(move || pipeline.model_info()).await;

    match info {
        Ok(Ok(info)) => (StatusCode::OK, Json(json!(info))),
        Ok(Err(e)) => {
            tracing::error!("Model info unavailable: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string(), "model_loaded": false })),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string(), "model_loaded": false })),
        ),
    }
}
