//! Prediction handler

use axum::{extract::State, Json};
use validator::Validate;

use pregnancy_risk_core::{Predictor, RawObservation};

use crate::models::{PredictionRequest, PredictionResponse};
use crate::{AppResult, AppState};

pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictionRequest>,
) -> AppResult<Json<PredictionResponse>> {
    req.validate()?;

    let observation = RawObservation::from(&req);
    tracing::debug!(?observation, "Prediction request");

    let result = Predictor::new(&state.artifacts).predict(&observation)?;

    Ok(Json(PredictionResponse::from(result)))
}
