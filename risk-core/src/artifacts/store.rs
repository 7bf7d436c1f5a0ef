//! Artifact Store - trained state loaded once at startup
//!
//! Holds the classifier, the scaling parameters and the label codec.
//! Immutable after construction; share it behind an `Arc` and read it from
//! any number of threads without locking.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::codec::LabelCodec;
use super::scaler::ScalingParameters;
use crate::config::ArtifactConfig;
use crate::constants::{LABEL_ENCODER_FILE, MODEL_FILES, SCALER_FILE};
use crate::error::{ArtifactKind, InitializationError};
use crate::features::layout::{layout_hash, FEATURE_VERSION};
use crate::model::{load_classifier, Classifier};

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// One artifact's origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactFile {
    pub path: String,
    /// Hex SHA-256 of the file contents; None for in-memory artifacts
    pub sha256: Option<String>,
}

impl ArtifactFile {
    fn memory() -> Self {
        Self {
            path: "<memory>".to_string(),
            sha256: None,
        }
    }
}

/// What was loaded, from where, and when
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub classifier_kind: String,
    pub classifier: ArtifactFile,
    pub scaler: ArtifactFile,
    pub codec_kind: String,
    pub codec: Option<ArtifactFile>,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub loaded_at: DateTime<Utc>,
}

/// Health-check view of the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStatus {
    pub ready: bool,
    pub classifier_kind: Option<String>,
    pub codec_kind: String,
    pub info: Option<ArtifactInfo>,
}

// ============================================================================
// STORE
// ============================================================================

#[derive(Debug)]
pub struct ArtifactStore {
    classifier: Option<Box<dyn Classifier>>,
    scaler: Option<ScalingParameters>,
    codec: LabelCodec,
    info: Option<ArtifactInfo>,
}

impl ArtifactStore {
    /// A store with nothing loaded; every prediction fails with NotReady
    pub fn unloaded() -> Self {
        Self {
            classifier: None,
            scaler: None,
            codec: LabelCodec::Canonical,
            info: None,
        }
    }

    /// Load all artifacts from the configured directories
    ///
    /// The first directory holding a classifier supplies all three artifacts.
    /// Classifier and scaler are required; a missing codec falls back to
    /// the canonical High=0, Low=1 mapping.
    pub fn initialize(config: &ArtifactConfig) -> Result<Self, InitializationError> {
        let search_dirs = config.search_dirs();
        let (dir, model_path) = locate_classifier(&search_dirs)?;

        tracing::info!(dir = %dir.display(), "Resolved artifact directory");

        let scaler_path = dir.join(SCALER_FILE);
        if !scaler_path.is_file() {
            return Err(InitializationError::MissingArtifact {
                artifact: ArtifactKind::Scaler,
                tried: search_dirs.iter().map(|d| d.join(SCALER_FILE)).collect(),
            });
        }

        let classifier = load_classifier(&model_path)?;
        let classifier_file = describe(ArtifactKind::Classifier, &model_path)?;
        tracing::info!(
            path = %model_path.display(),
            kind = classifier.kind(),
            sha256 = ?classifier_file.sha256,
            "Classifier loaded"
        );

        let scaler = ScalingParameters::load(&scaler_path)?;
        let scaler_file = describe(ArtifactKind::Scaler, &scaler_path)?;
        tracing::info!(
            path = %scaler_path.display(),
            dimension = scaler.dimension(),
            sha256 = ?scaler_file.sha256,
            "Scaler loaded"
        );

        let codec_path = dir.join(LABEL_ENCODER_FILE);
        let (codec, codec_file) = if codec_path.is_file() {
            let codec = LabelCodec::load(&codec_path)?;
            let file = describe(ArtifactKind::LabelCodec, &codec_path)?;
            tracing::info!(path = %codec_path.display(), classes = ?codec.classes(), "Label codec loaded");
            (codec, Some(file))
        } else {
            tracing::warn!(
                path = %codec_path.display(),
                "Label codec not found, using canonical mapping High=0, Low=1"
            );
            (LabelCodec::Canonical, None)
        };

        check_class_count(classifier.as_ref(), &codec)?;

        let info = ArtifactInfo {
            classifier_kind: classifier.kind().to_string(),
            classifier: classifier_file,
            scaler: scaler_file,
            codec_kind: codec.kind().to_string(),
            codec: codec_file,
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            loaded_at: Utc::now(),
        };

        tracing::info!("Artifact store ready");

        Ok(Self {
            classifier: Some(classifier),
            scaler: Some(scaler),
            codec,
            info: Some(info),
        })
    }

    /// Assemble a store from in-memory parts (same checks as `initialize`)
    pub fn from_parts(
        classifier: Box<dyn Classifier>,
        scaler: ScalingParameters,
        codec: Option<LabelCodec>,
    ) -> Result<Self, InitializationError> {
        scaler.check(Path::new("<memory>"))?;

        let codec = codec.unwrap_or_default();
        check_class_count(classifier.as_ref(), &codec)?;

        let info = ArtifactInfo {
            classifier_kind: classifier.kind().to_string(),
            classifier: ArtifactFile::memory(),
            scaler: ArtifactFile::memory(),
            codec_kind: codec.kind().to_string(),
            codec: None,
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            loaded_at: Utc::now(),
        };

        Ok(Self {
            classifier: Some(classifier),
            scaler: Some(scaler),
            codec,
            info: Some(info),
        })
    }

    /// True iff both classifier and scaler are loaded
    pub fn is_ready(&self) -> bool {
        self.classifier.is_some() && self.scaler.is_some()
    }

    pub fn classifier(&self) -> Option<&dyn Classifier> {
        self.classifier.as_deref()
    }

    pub fn scaler(&self) -> Option<&ScalingParameters> {
        self.scaler.as_ref()
    }

    pub fn codec(&self) -> &LabelCodec {
        &self.codec
    }

    pub fn info(&self) -> Option<&ArtifactInfo> {
        self.info.as_ref()
    }

    pub fn status(&self) -> StoreStatus {
        StoreStatus {
            ready: self.is_ready(),
            classifier_kind: self.classifier().map(|c| c.kind().to_string()),
            codec_kind: self.codec.kind().to_string(),
            info: self.info.clone(),
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// First directory (in search order) containing a classifier file
fn locate_classifier(search_dirs: &[PathBuf]) -> Result<(PathBuf, PathBuf), InitializationError> {
    let mut tried = Vec::new();

    for dir in search_dirs {
        for file in MODEL_FILES {
            let path = dir.join(file);
            if path.is_file() {
                return Ok((dir.clone(), path));
            }
            tried.push(path);
        }
    }

    Err(InitializationError::MissingArtifact {
        artifact: ArtifactKind::Classifier,
        tried,
    })
}

fn check_class_count(classifier: &dyn Classifier, codec: &LabelCodec) -> Result<(), InitializationError> {
    match classifier.class_count() {
        Some(n) if n != codec.len() => Err(InitializationError::ClassCountMismatch {
            classifier: n,
            codec: codec.len(),
        }),
        _ => Ok(()),
    }
}

fn describe(artifact: ArtifactKind, path: &Path) -> Result<ArtifactFile, InitializationError> {
    let data = std::fs::read(path).map_err(|source| InitializationError::Io {
        artifact,
        path: path.to_path_buf(),
        source,
    })?;

    Ok(ArtifactFile {
        path: path.display().to_string(),
        sha256: Some(hex::encode(Sha256::digest(&data))),
    })
}
