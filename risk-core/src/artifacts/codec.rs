//! Label Codec - class index ↔ risk label
//!
//! Two variants, chosen at load time:
//! - `Encoded`: read from `label_encoder.json`
//! - `Canonical`: no artifact; lexicographic order High=0, Low=1, which is how
//!   the training labels were encoded

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactKind, InitializationError, PredictError};

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Risk label predicted by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Low => "Low",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(RiskLevel::High),
            "Low" => Ok(RiskLevel::Low),
            other => Err(format!("Unknown risk level: {}", other)),
        }
    }
}

/// Lexicographic order of the training labels
pub const CANONICAL_CLASSES: [RiskLevel; 2] = [RiskLevel::High, RiskLevel::Low];

// ============================================================================
// LABEL CODEC
// ============================================================================

/// On-disk form of the codec
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoderArtifact {
    pub classes: Vec<RiskLevel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelCodec {
    Encoded { classes: Vec<RiskLevel> },
    Canonical,
}

impl LabelCodec {
    /// Load from `label_encoder.json`
    pub fn load(path: &Path) -> Result<Self, InitializationError> {
        let data = std::fs::read(path).map_err(|source| InitializationError::Io {
            artifact: ArtifactKind::LabelCodec,
            path: path.to_path_buf(),
            source,
        })?;

        let artifact: LabelEncoderArtifact =
            serde_json::from_slice(&data).map_err(|source| InitializationError::Corrupt {
                artifact: ArtifactKind::LabelCodec,
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_classes(artifact.classes).map_err(|reason| InitializationError::InvalidArtifact {
            artifact: ArtifactKind::LabelCodec,
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Build an encoded codec; must name both labels exactly once
    pub fn from_classes(classes: Vec<RiskLevel>) -> Result<Self, String> {
        let complete = classes.len() == CANONICAL_CLASSES.len()
            && CANONICAL_CLASSES.iter().all(|c| classes.contains(c));

        if !complete {
            return Err(format!(
                "expected exactly the labels {:?}, got {:?}",
                CANONICAL_CLASSES, classes
            ));
        }

        Ok(LabelCodec::Encoded { classes })
    }

    /// Labels in index order
    pub fn classes(&self) -> &[RiskLevel] {
        match self {
            LabelCodec::Encoded { classes } => classes,
            LabelCodec::Canonical => &CANONICAL_CLASSES,
        }
    }

    pub fn len(&self) -> usize {
        self.classes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes().is_empty()
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LabelCodec::Canonical)
    }

    /// Class index → label; out-of-range indices are an error, never clamped
    pub fn decode(&self, index: i64) -> Result<RiskLevel, PredictError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.classes().get(i).copied())
            .ok_or(PredictError::Decode {
                index,
                known: self.len(),
            })
    }

    /// Label → class index
    pub fn encode(&self, label: RiskLevel) -> Option<usize> {
        self.classes().iter().position(|c| *c == label)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LabelCodec::Encoded { .. } => "label_encoder",
            LabelCodec::Canonical => "canonical",
        }
    }
}

impl Default for LabelCodec {
    fn default() -> Self {
        LabelCodec::Canonical
    }
}

// ============================================================================
// TESTS
// ============================================================================
