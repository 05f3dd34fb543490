//! Random scenario handler

use axum::{extract::Query, Json};
use reactor_risk_core::logic::scenario;
use reactor_risk_core::{RawRecord, RiskProfile};
use serde::Deserialize;

use crate::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ScenarioQuery {
    pub profile: Option<String>,
    pub seed: Option<u64>,
}

/// Generate a telemetry snapshot for a risk profile
pub async fn generate(Query(query): Query<ScenarioQuery>) -> AppResult<Json<RawRecord>> {
    let profile = match query.profile.as_deref() {
        Some(name) => name
            .parse::<RiskProfile>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?,
        None => RiskProfile::default(),
    };

    let record = match query.seed {
        Some(seed) => scenario::generate_seeded(profile, seed),
        None => scenario::generate_random(profile),
    };

    Ok(Json(record))
}
