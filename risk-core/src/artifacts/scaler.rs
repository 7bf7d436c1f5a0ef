//! Scaling Parameters - standardization fitted at training time
//!
//! Artifact format (JSON):
//! ```json
//! { "mean": [..16], "scale": [..16], "feature_version": 1, "layout_hash": 123, "feature_names": [..] }
//! ```
//! Layout metadata is optional; when present it must match the current layout.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactKind, InitializationError, PredictError};
use crate::features::layout::{
    layout_hash, names_match_layout, validate_layout, FEATURE_COUNT, FEATURE_VERSION,
};
use crate::features::{FeatureVector, ScaledVector};

/// Per-feature mean and scale, positionally aligned with the feature layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingParameters {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_version: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_hash: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl ScalingParameters {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self {
            mean,
            scale,
            feature_version: None,
            layout_hash: None,
            feature_names: None,
        }
    }

    /// Number of feature positions covered
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Load and validate from a JSON file
    pub fn load(path: &Path) -> Result<Self, InitializationError> {
        let data = std::fs::read(path).map_err(|source| InitializationError::Io {
            artifact: ArtifactKind::Scaler,
            path: path.to_path_buf(),
            source,
        })?;

        let params: ScalingParameters =
            serde_json::from_slice(&data).map_err(|source| InitializationError::Corrupt {
                artifact: ArtifactKind::Scaler,
                path: path.to_path_buf(),
                source,
            })?;

        params.check(path)?;
        Ok(params)
    }

    /// Structural checks. Dimension drift against the layout is left for
    /// `transform` to report, so it surfaces per request.
    pub(crate) fn check(&self, path: &Path) -> Result<(), InitializationError> {
        let invalid = |reason: String| InitializationError::InvalidArtifact {
            artifact: ArtifactKind::Scaler,
            path: path.to_path_buf(),
            reason,
        };

        if self.mean.len() != self.scale.len() {
            return Err(invalid(format!(
                "mean has {} entries but scale has {}",
                self.mean.len(),
                self.scale.len()
            )));
        }

        if let Some(i) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(invalid(format!("mean[{}] is not finite", i)));
        }

        if let Some(i) = self.scale.iter().position(|s| !s.is_finite() || *s == 0.0) {
            return Err(invalid(format!("scale[{}] must be finite and non-zero", i)));
        }

        // Each field is checked on its own; an absent one counts as current
        if self.feature_version.is_some() || self.layout_hash.is_some() {
            let version = self.feature_version.unwrap_or(FEATURE_VERSION);
            let hash = self.layout_hash.unwrap_or_else(layout_hash);
            validate_layout(version, hash).map_err(|source| InitializationError::LayoutMismatch {
                path: path.to_path_buf(),
                source,
            })?;
        }

        if let Some(names) = &self.feature_names {
            if !names_match_layout(names) {
                return Err(invalid(format!(
                    "feature_names do not match the feature layout: {:?}",
                    names
                )));
            }
        }

        if self.dimension() != FEATURE_COUNT {
            tracing::warn!(
                path = %path.display(),
                dimension = self.dimension(),
                expected = FEATURE_COUNT,
                "Scaler dimension disagrees with feature layout; every prediction will fail"
            );
        }

        Ok(())
    }

    /// Elementwise `(value - mean[i]) / scale[i]`
    ///
    /// Never truncates or pads: any length disagreement is an error.
    pub fn transform(&self, features: &FeatureVector) -> Result<ScaledVector, PredictError> {
        if self.mean.len() != features.len() || self.scale.len() != features.len() {
            return Err(PredictError::DimensionMismatch {
                features: features.len(),
                scaler: self.mean.len().min(self.scale.len()),
            });
        }

        let mut scaled = [0.0f64; FEATURE_COUNT];
        for (i, value) in features.as_array().iter().enumerate() {
            scaled[i] = (value - self.mean[i]) / self.scale[i];
        }

        Ok(ScaledVector::new(scaled))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::layout::FEATURE_LAYOUT;

    fn identity() -> ScalingParameters {
        ScalingParameters::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT])
    }

    #[test]
    fn test_transform_standardizes() {
        let mut params = identity();
        params.mean[0] = 30.0;
        params.scale[0] = 5.0;

        let mut values = [1.0; FEATURE_COUNT];
        values[0] = 40.0;
        let scaled = params.transform(&FeatureVector::from_values(values)).unwrap();

        assert_eq!(scaled.as_array()[0], 2.0);
        assert_eq!(scaled.as_array()[1], 1.0);
    }

    #[test]
    fn test_transform_rejects_short_scaler() {
        let params = ScalingParameters::new(vec![0.0; 15], vec![1.0; 15]);
        let err = params
            .transform(&FeatureVector::from_values([0.0; FEATURE_COUNT]))
            .unwrap_err();

        match err {
            PredictError::DimensionMismatch { features, scaler } => {
                assert_eq!(features, 16);
                assert_eq!(scaler, 15);
            }
            other => panic!("Expected DimensionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_check_rejects_zero_scale() {
        let mut params = identity();
        params.scale[3] = 0.0;
        let err = params.check(Path::new("scaler.json")).unwrap_err();
        assert!(err.to_string().contains("scale[3]"));
    }

    #[test]
    fn test_check_rejects_unequal_lengths() {
        let params = ScalingParameters::new(vec![0.0; FEATURE_COUNT], vec![1.0; 15]);
        assert!(params.check(Path::new("scaler.json")).is_err());
    }

    #[test]
    fn test_check_accepts_wrong_dimension_for_runtime_reporting() {
        let params = ScalingParameters::new(vec![0.0; 15], vec![1.0; 15]);
        assert!(params.check(Path::new("scaler.json")).is_ok());
    }

    #[test]
    fn test_check_layout_metadata() {
        let mut params = identity();
        params.feature_version = Some(FEATURE_VERSION);
        params.layout_hash = Some(layout_hash());
        params.feature_names = Some(FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect());
        assert!(params.check(Path::new("scaler.json")).is_ok());

        params.layout_hash = Some(!layout_hash());
        assert!(matches!(
            params.check(Path::new("scaler.json")),
            Err(InitializationError::LayoutMismatch { .. })
        ));
    }

    #[test]
    fn test_check_rejects_partial_metadata() {
        let mut params = identity();
        params.feature_version = Some(99);
        match params.check(Path::new("scaler.json")) {
            Err(InitializationError::LayoutMismatch { source, .. }) => {
                assert_eq!(source.actual_version, 99);
                assert_eq!(source.expected_version, FEATURE_VERSION);
            }
            other => panic!("Expected LayoutMismatch, got {:?}", other),
        }

        let mut params = identity();
        params.layout_hash = Some(layout_hash().wrapping_add(1));
        assert!(matches!(
            params.check(Path::new("scaler.json")),
            Err(InitializationError::LayoutMismatch { .. })
        ));

        let mut params = identity();
        params.feature_version = Some(FEATURE_VERSION);
        assert!(params.check(Path::new("scaler.json")).is_ok());

        let mut params = identity();
        params.layout_hash = Some(layout_hash());
        assert!(params.check(Path::new("scaler.json")).is_ok());
    }

    #[test]
    fn test_check_rejects_reordered_names() {
        let mut names: Vec<String> = FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect();
        names.swap(11, 12);

        let mut params = identity();
        params.feature_names = Some(names);
        assert!(params.check(Path::new("scaler.json")).is_err());
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaler.json");
        std::fs::write(&path, b"{ not json").unwrap();

        match ScalingParameters::load(&path) {
            Err(InitializationError::Corrupt { artifact, .. }) => {
                assert_eq!(artifact, ArtifactKind::Scaler)
            }
            other => panic!("Expected Corrupt, got {:?}", other),
        }
    }
}
