//! Logistic Regression Classifier
//!
//! Portable export of a fitted logistic regression:
//! ```json
//! { "coefficients": [[..16]], "intercepts": [b] }
//! ```
//! One coefficient row means binary (sigmoid, row scores class 1).
//! N rows mean multinomial (softmax over N classes).

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{argmax, Classification, Classifier};
use crate::error::{ArtifactKind, InitializationError, PredictError};
use crate::features::{ScaledVector, FEATURE_COUNT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticClassifier {
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LogisticClassifier {
    pub fn new(coefficients: Vec<Vec<f64>>, intercepts: Vec<f64>) -> Result<Self, String> {
        let model = Self { coefficients, intercepts };
        model.check()?;
        Ok(model)
    }

    pub fn load(path: &Path) -> Result<Self, InitializationError> {
        let data = std::fs::read(path).map_err(|source| InitializationError::Io {
            artifact: ArtifactKind::Classifier,
            path: path.to_path_buf(),
            source,
        })?;

        let model: LogisticClassifier =
            serde_json::from_slice(&data).map_err(|source| InitializationError::Corrupt {
                artifact: ArtifactKind::Classifier,
                path: path.to_path_buf(),
                source,
            })?;

        model.check().map_err(|reason| InitializationError::InvalidArtifact {
            artifact: ArtifactKind::Classifier,
            path: path.to_path_buf(),
            reason,
        })?;

        Ok(model)
    }

    fn check(&self) -> Result<(), String> {
        if self.coefficients.is_empty() {
            return Err("no coefficient rows".to_string());
        }
        if self.coefficients.len() != self.intercepts.len() {
            return Err(format!(
                "{} coefficient rows but {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            ));
        }
        for (k, row) in self.coefficients.iter().enumerate() {
            if row.len() != FEATURE_COUNT {
                return Err(format!(
                    "coefficient row {} has {} weights, expected {}",
                    k,
                    row.len(),
                    FEATURE_COUNT
                ));
            }
            if row.iter().any(|w| !w.is_finite()) {
                return Err(format!("coefficient row {} is not finite", k));
            }
        }
        if self.intercepts.iter().any(|b| !b.is_finite()) {
            return Err("intercepts are not finite".to_string());
        }
        Ok(())
    }

    fn is_binary(&self) -> bool {
        self.coefficients.len() == 1
    }

    fn decision(&self, x: &[f64]) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + b)
            .collect()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

impl Classifier for LogisticClassifier {
    fn classify(&self, input: &ScaledVector) -> Result<Classification, PredictError> {
        let scores = self.decision(input.as_slice());

        let probabilities = if self.is_binary() {
            let p1 = sigmoid(scores[0]);
            vec![1.0 - p1, p1]
        } else {
            softmax(&scores)
        };

        let class_index = argmax(&probabilities)
            .ok_or_else(|| PredictError::inference("empty probability vector"))?;

        Ok(Classification {
            class_index: class_index as i64,
            probabilities,
        })
    }

    fn class_count(&self) -> Option<usize> {
        Some(if self.is_binary() { 2 } else { self.coefficients.len() })
    }

    fn kind(&self) -> &'static str {
        "logistic_regression"
    }
}

// ============================================================================
// TESTS
// ============================================================================
