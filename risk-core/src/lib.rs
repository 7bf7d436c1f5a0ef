//! Pregnancy Risk Core - Inference Pipeline
//!
//! Predicts a "High"/"Low" pregnancy risk label from eleven clinical vitals.
//!
//! ## Architecture
//! - `features/` - Feature engineering (raw vitals → 16 ordered features)
//! - `artifacts/` - Trained state (scaler, label codec, store)
//! - `model/` - Classifier backends (ONNX, logistic regression)
//! - `predictor/` - Orchestration, decoding, explanation
//!
//! ```no_run
//! use pregnancy_risk_core::{ArtifactConfig, ArtifactStore, Predictor, RawObservation};
//!
//! let store = ArtifactStore::initialize(&ArtifactConfig::from_env())?;
//! let observation = RawObservation {
//!     age: 28.0, systolic_bp: 120.0, diastolic_bp: 80.0, blood_sugar: 7.0,
//!     body_temp: 98.6, bmi: 22.0, previous_complications: 0,
//!     preexisting_diabetes: 0, gestational_diabetes: 0, mental_health: 0,
//!     heart_rate: 75.0,
//! };
//! let result = Predictor::new(&store).predict(&observation)?;
//! println!("{} ({:.2})", result.risk_level, result.confidence);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod artifacts;
pub mod config;
pub mod constants;
pub mod error;
pub mod features;
pub mod model;
pub mod predictor;

// Re-export common types
pub use artifacts::{ArtifactInfo, ArtifactStore, LabelCodec, RiskLevel, ScalingParameters, StoreStatus};
pub use config::ArtifactConfig;
pub use error::{ArtifactKind, ErrorKind, InitializationError, PredictError, PredictResult};
pub use features::{derive, FeatureVector, LayoutInfo, RawObservation, ScaledVector};
pub use model::{Classification, Classifier};
pub use predictor::{ClassProbability, Explanation, PredictionResult, Predictor};
