//! Central Configuration Constants
//!
//! Single source of truth for artifact names and default locations.
//! To change where the service looks for trained artifacts, only edit this file.

/// Primary artifact directory (relative to the working directory)
pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

/// Searched when the primary directory holds no classifier
pub const DEFAULT_FALLBACK_DIR: &str = ".";

/// Classifier exported to ONNX (preferred)
pub const ONNX_MODEL_FILE: &str = "pregnancy_risk_model.onnx";

/// Classifier exported as portable logistic-regression coefficients
pub const JSON_MODEL_FILE: &str = "pregnancy_risk_model.json";

/// Scaling parameters (mean/scale per feature)
pub const SCALER_FILE: &str = "scaler.json";

/// Optional label codec
pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";

/// Classifier files in lookup order
pub const MODEL_FILES: &[&str] = &[ONNX_MODEL_FILE, JSON_MODEL_FILE];

/// Tolerance on the classifier probability sum
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Library version
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get primary artifact directory from environment or use default
pub fn get_artifact_dir() -> String {
    std::env::var("ARTIFACT_DIR")
        .unwrap_or_else(|_| DEFAULT_ARTIFACT_DIR.to_string())
}

/// Get fallback artifact directory from environment or use default
pub fn get_fallback_dir() -> String {
    std::env::var("ARTIFACT_FALLBACK_DIR")
        .unwrap_or_else(|_| DEFAULT_FALLBACK_DIR.to_string())
}
