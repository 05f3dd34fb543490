//! Prediction handler

use axum::{body::Bytes, extract::State, Json};
use reactor_risk_core::{PredictionReport, RawRecord};
use serde_json::Value;

use crate::{AppError, AppResult, AppState};

const NO_INPUT: &str = "No input data provided";

/// Parse the request body into a record
///
/// Empty bodies, `null`, `{}` and non-object JSON are all "no input".
fn parse_record(body: &[u8]) -> AppResult<RawRecord> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest(NO_INPUT.to_string()));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON: {}", e)))?;

    match value {
        Value::Object(map) if !map.is_empty() => RawRecord::from_json(Value::Object(map))
            .map_err(|e| AppError::BadRequest(format!("Invalid input: {}", e))),
        _ => Err(AppError::BadRequest(NO_INPUT.to_string())),
    }
}

/// Score a telemetry snapshot
pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<PredictionReport>> {
    let record = parse_record(&body)?;

    let pipeline = state.pipeline.clone();
    let report = tokio::task::spawn_blocking(move || pipeline.predict(&record)).await??;

    tracing::info!(
        incident = report.incident_occurred,
        probability = report.incident_probability,
        incident_type = %report.incident_type,
        "Prediction served"
    );

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_rejects_empty_input() {
        for body in ["", "  \n", "null", "{}", "[]", "42", "\"text\""] {
            let err = parse_record(body.as_bytes()).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(ref msg) if msg == NO_INPUT), "{}", body);
        }
    }

    #[test]
    fn test_parse_record_malformed() {
        let err = parse_record(b"{\"core_temp_c\": ").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref msg) if msg.starts_with("Invalid JSON")));
    }

    #[test]
    fn test_parse_record_object() {
        let record = parse_record(br#"{"core_temp_c": 301, "country": "Spain"}"#).unwrap();
        assert!(record.core_temp_c.is_some());
        assert!(record.neutron_flux.is_none());
    }
}
