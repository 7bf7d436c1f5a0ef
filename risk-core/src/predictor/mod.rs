//! Predictor - the inference pipeline
//!
//! derive → scale → classify → decode → assemble.
//! Each step depends on the previous one succeeding. No retries: every
//! failure here is a missing artifact or a training/serving contract break.

pub mod explain;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::artifacts::{ArtifactStore, RiskLevel};
use crate::constants::PROBABILITY_TOLERANCE;
use crate::error::{PredictError, PredictResult};
use crate::features::{derive, RawObservation, ScaledVector};
use crate::model::Classification;

pub use explain::Explanation;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    pub label: RiskLevel,
    pub probability: f64,
}

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub risk_level: RiskLevel,
    /// Probability of `risk_level`
    pub confidence: f64,
    /// One entry per codec label, in codec order
    pub probabilities: Vec<ClassProbability>,
    pub explanation: String,
}

impl PredictionResult {
    pub fn probability_of(&self, label: RiskLevel) -> Option<f64> {
        self.probabilities
            .iter()
            .find(|p| p.label == label)
            .map(|p| p.probability)
    }

    /// Label name → probability, for JSON responses
    pub fn probability_map(&self) -> BTreeMap<String, f64> {
        self.probabilities
            .iter()
            .map(|p| (p.label.to_string(), p.probability))
            .collect()
    }
}

// ============================================================================
// PREDICTOR
// ============================================================================

/// Borrows the artifact store for the duration of a call; owns no state
#[derive(Debug, Clone, Copy)]
pub struct Predictor<'a> {
    store: &'a ArtifactStore,
}

impl<'a> Predictor<'a> {
    pub fn new(store: &'a ArtifactStore) -> Self {
        Self { store }
    }

    /// Derive and standardize features without classifying
    pub fn transform(&self, observation: &RawObservation) -> PredictResult<ScaledVector> {
        if !self.store.is_ready() {
            return Err(PredictError::NotReady);
        }
        let scaler = self.store.scaler().ok_or(PredictError::NotReady)?;
        scaler.transform(&derive(observation))
    }

    pub fn predict(&self, observation: &RawObservation) -> PredictResult<PredictionResult> {
        let start_time = Instant::now();

        let (classifier, scaler) = match (self.store.classifier(), self.store.scaler()) {
            (Some(classifier), Some(scaler)) => (classifier, scaler),
            _ => return Err(PredictError::NotReady),
        };

        let features = derive(observation);
        tracing::debug!(features = %features.to_log_entry(), "Features derived");

        let scaled = scaler.transform(&features)?;

        let output = classifier.classify(&scaled)?;
        let codec = self.store.codec();
        check_output(&output, codec.len())?;

        let risk_level = codec.decode(output.class_index)?;
        // In range: decode succeeded and there is one probability per label
        let confidence = output.probabilities[output.class_index as usize];

        let probabilities = codec
            .classes()
            .iter()
            .zip(&output.probabilities)
            .map(|(label, probability)| ClassProbability {
                label: *label,
                probability: *probability,
            })
            .collect();

        let explanation = Explanation::from_observation(observation).to_string();

        tracing::info!(
            risk_level = %risk_level,
            confidence,
            classifier = classifier.kind(),
            inference_time_us = start_time.elapsed().as_micros() as u64,
            "Prediction complete"
        );

        Ok(PredictionResult {
            risk_level,
            confidence,
            probabilities,
            explanation,
        })
    }
}

/// Probabilities: one per class, finite, non-negative, summing to 1
fn check_output(output: &Classification, class_count: usize) -> PredictResult<()> {
    let probs = &output.probabilities;

    if probs.len() != class_count {
        return Err(PredictError::InvalidOutput(format!(
            "{} probabilities for {} classes",
            probs.len(),
            class_count
        )));
    }

    if probs.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return Err(PredictError::InvalidOutput(format!(
            "probabilities must be finite and non-negative: {:?}",
            probs
        )));
    }

    let sum: f64 = probs.iter().sum();
    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(PredictError::InvalidOutput(format!(
            "probabilities sum to {}",
            sum
        )));
    }

    Ok(())
}
