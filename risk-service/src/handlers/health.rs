//! Health and readiness handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use pregnancy_risk_core::{constants::CORE_VERSION, features::LayoutInfo, ArtifactInfo};

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    core_version: &'static str,
    environment: String,
    model_loaded: bool,
    model_type: Option<String>,
    feature_version: u8,
    layout_hash: u32,
    artifacts: Option<ArtifactInfo>,
    timestamp: i64,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    ready: bool,
}

/// Liveness: always 200, reports what was loaded
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = state.artifacts.status();
    let layout = LayoutInfo::current();

    Json(HealthResponse {
        status: "healthy",
        service: "pregnancy-risk-service",
        version: env!("CARGO_PKG_VERSION"),
        core_version: CORE_VERSION,
        environment: state.config.environment.clone(),
        model_loaded: status.ready,
        model_type: status.classifier_kind,
        feature_version: layout.version,
        layout_hash: layout.hash,
        artifacts: status.info,
        timestamp: chrono::Utc::now().timestamp(),
    })
}

/// Readiness: 503 until the artifact store is loaded
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let ready = state.artifacts.is_ready();
    let code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (code, Json(ReadyResponse { ready }))
}
