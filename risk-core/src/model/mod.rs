//! Model Module - Classifier Abstraction
//!
//! A classifier maps a scaled feature vector to a class index plus a
//! probability per class. Backends:
//! - `linear` - logistic regression exported as JSON coefficients
//! - `onnx` - any sklearn-onnx export (feature `onnx`)

pub mod linear;
#[cfg(feature = "onnx")]
pub mod onnx;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactKind, InitializationError, PredictError};
use crate::features::ScaledVector;

pub use linear::LogisticClassifier;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Raw classifier output, before decoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Index into the label codec
    pub class_index: i64,
    /// One entry per class, in class index order
    pub probabilities: Vec<f64>,
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trait for classifier backends (ONNX, linear, ...)
///
/// Implementations are read-only after load and shared across threads.
pub trait Classifier: Send + Sync + std::fmt::Debug {
    fn classify(&self, input: &ScaledVector) -> Result<Classification, PredictError>;

    /// Number of classes, if the artifact declares it
    fn class_count(&self) -> Option<usize>;

    /// Short backend name for diagnostics
    fn kind(&self) -> &'static str;
}

// ============================================================================
// LOADING
// ============================================================================

/// Load a classifier, choosing the backend by file extension
pub fn load_classifier(path: &Path) -> Result<Box<dyn Classifier>, InitializationError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Box::new(LogisticClassifier::load(path)?)),
        #[cfg(feature = "onnx")]
        Some("onnx") => Ok(Box::new(OnnxClassifier::load(path)?)),
        _ => Err(InitializationError::InvalidArtifact {
            artifact: ArtifactKind::Classifier,
            path: path.to_path_buf(),
            reason: "unsupported classifier format".to_string(),
        }),
    }
}

/// Index of the largest value; first one wins on ties
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
