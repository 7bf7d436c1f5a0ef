//! Pregnancy Risk Service
//!
//! HTTP front end for the risk inference pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │              PREGNANCY RISK SERVICE              │
//! ├──────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌───────────────────────────┐  │
//! │  │  API       │──▶│  Predictor                │  │
//! │  │  (Axum)    │   │  derive → scale → classify│  │
//! │  └────────────┘   └─────────────┬─────────────┘  │
//! │                                 ▼                │
//! │                   ┌───────────────────────────┐  │
//! │                   │  ArtifactStore (read-only)│  │
//! │                   └───────────────────────────┘  │
//! └──────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod models;


use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pregnancy_risk_core::ArtifactStore;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let json_logs = config.is_production();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "pregnancy_risk_service=debug,pregnancy_risk_core=info,tower_http=debug".into()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .init();

    tracing::info!("Pregnancy Risk Service starting ({})...", config.environment);

    // Artifacts are loaded once; the service never runs without them
    let artifacts = ArtifactStore::initialize(&config.artifacts)
        .inspect_err(|e| tracing::error!("Artifact initialization failed: {}", e))
        .context("Failed to load model artifacts")?;

    let state = AppState {
        artifacts: Arc::new(artifacts),
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<ArtifactStore>,
    pub config: config::Config,
}

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/ready", get(handlers::health::ready))
        .route("/predict", post(handlers::predict::predict))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
