//! Error types for the inference pipeline.
//!
//! `InitializationError` is process-fatal. `PredictError` is local to one call.
//! Neither is ever retried inside the core.

use std::path::PathBuf;

use thiserror::Error;

use crate::features::LayoutMismatchError;

/// Which trained artifact an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Classifier,
    Scaler,
    LabelCodec,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Classifier => "classifier",
            ArtifactKind::Scaler => "scaler",
            ArtifactKind::LabelCodec => "label codec",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Artifact loading failed; the process must not serve predictions
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("{artifact} artifact not found. Tried:\n{}", display_paths(.tried))]
    MissingArtifact {
        artifact: ArtifactKind,
        tried: Vec<PathBuf>,
    },

    #[error("Failed to read {artifact} artifact at {}: {source}", .path.display())]
    Io {
        artifact: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to deserialize {artifact} artifact at {}: {source}", .path.display())]
    Corrupt {
        artifact: ArtifactKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {artifact} artifact at {}: {reason}", .path.display())]
    InvalidArtifact {
        artifact: ArtifactKind,
        path: PathBuf,
        reason: String,
    },

    #[error("Scaler at {} was fitted for another feature layout: {source}", .path.display())]
    LayoutMismatch {
        path: PathBuf,
        #[source]
        source: LayoutMismatchError,
    },

    #[error("Classifier predicts {classifier} classes but the label codec knows {codec}")]
    ClassCountMismatch { classifier: usize, codec: usize },

    #[error("Inference runtime failed to load {}: {message}", .path.display())]
    Runtime { path: PathBuf, message: String },
}

/// Coarse category used by callers to pick a user-facing response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Retry after readiness is confirmed
    NotReady,
    /// Training/serving contract broken; operator-actionable
    ContractViolation,
}

/// A single prediction failed
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Model or scaler not loaded")]
    NotReady,

    #[error("Feature vector has {features} values but scaling parameters have {scaler}")]
    DimensionMismatch { features: usize, scaler: usize },

    #[error("Classifier returned class index {index}, label codec knows {known} classes")]
    Decode { index: i64, known: usize },

    #[error("Classifier output violates contract: {0}")]
    InvalidOutput(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}

impl PredictError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictError::NotReady => ErrorKind::NotReady,
            _ => ErrorKind::ContractViolation,
        }
    }

    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }
}

pub type PredictResult<T> = Result<T, PredictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifact_lists_paths() {
        let err = InitializationError::MissingArtifact {
            artifact: ArtifactKind::Scaler,
            tried: vec![PathBuf::from("artifacts/scaler.json"), PathBuf::from("scaler.json")],
        };
        let msg = err.to_string();

        assert!(msg.starts_with("scaler artifact not found"));
        assert!(msg.contains("artifacts/scaler.json"));
        assert!(msg.contains("  - scaler.json"));
    }

    #[test]
    fn test_predict_error_kind() {
        assert_eq!(PredictError::NotReady.kind(), ErrorKind::NotReady);
        assert_eq!(
            PredictError::DimensionMismatch { features: 16, scaler: 15 }.kind(),
            ErrorKind::ContractViolation
        );
        assert_eq!(
            PredictError::Decode { index: 2, known: 2 }.kind(),
            ErrorKind::ContractViolation
        );
    }
}
