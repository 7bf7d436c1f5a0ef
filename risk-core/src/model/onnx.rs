//! ONNX Classifier - ONNX Runtime Integration
//!
//! Runs a classifier exported with sklearn-onnx (`zipmap` disabled), which
//! produces two outputs: `label` (int64, shape [1]) and `probabilities`
//! (float32, shape [1, n_classes]).
//!
//! `Session::run` takes `&mut self`, so the session sits behind a mutex and
//! concurrent ONNX predictions run one at a time. Everything around the run
//! (derive, scale, decode) stays lock-free.

use std::path::{Path, PathBuf};

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::{Classification, Classifier};
use crate::error::{ArtifactKind, InitializationError, PredictError};
use crate::features::{ScaledVector, FEATURE_COUNT};

const LABEL_OUTPUT: &str = "label";
const PROBABILITY_OUTPUT: &str = "probabilities";

pub struct OnnxClassifier {
    // `Session::run` needs `&mut`; the lock is held only for one run
    session: Mutex<Session>,
    label_output: String,
    probability_output: String,
    path: PathBuf,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("path", &self.path)
            .field("label_output", &self.label_output)
            .field("probability_output", &self.probability_output)
            .finish()
    }
}

impl OnnxClassifier {
    /// Load ONNX model from file
    pub fn load(path: &Path) -> Result<Self, InitializationError> {
        tracing::info!(path = %path.display(), "Loading ONNX classifier");

        let session = Session::builder()
            .map_err(|e| runtime_error(path, e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| runtime_error(path, e))?
            .commit_from_file(path)
            .map_err(|e| runtime_error(path, e))?;

        let names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let (label_output, probability_output) =
            select_outputs(&names).map_err(|reason| InitializationError::InvalidArtifact {
                artifact: ArtifactKind::Classifier,
                path: path.to_path_buf(),
                reason,
            })?;

        tracing::info!(
            label_output = %label_output,
            probability_output = %probability_output,
            "ONNX classifier loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            label_output,
            probability_output,
            path: path.to_path_buf(),
        })
    }
}

/// Label and probability output names: matched by name, else by position (0, 1)
fn select_outputs(names: &[String]) -> Result<(String, String), String> {
    if names.len() < 2 {
        return Err(format!(
            "expected `{}` and `{}` outputs (export with zipmap disabled), found {:?}",
            LABEL_OUTPUT, PROBABILITY_OUTPUT, names
        ));
    }

    let pick = |wanted: &str, position: usize| {
        names
            .iter()
            .find(|n| n.as_str() == wanted)
            .unwrap_or(&names[position])
            .clone()
    };

    Ok((pick(LABEL_OUTPUT, 0), pick(PROBABILITY_OUTPUT, 1)))
}

fn runtime_error(path: &Path, e: impl std::fmt::Display) -> InitializationError {
    InitializationError::Runtime {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&self, input: &ScaledVector) -> Result<Classification, PredictError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), input.to_f32().to_vec())
            .map_err(|e| PredictError::inference(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| PredictError::inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| PredictError::inference(format!("Inference failed: {}", e)))?;

        let label = outputs
            .get(&self.label_output)
            .ok_or_else(|| PredictError::inference(format!("No `{}` output", self.label_output)))?;
        let (_, labels) = label
            .try_extract_tensor::<i64>()
            .map_err(|e| PredictError::inference(format!("Extract label error: {}", e)))?;
        let class_index = *labels
            .first()
            .ok_or_else(|| PredictError::inference("Empty label output"))?;

        let probs = outputs.get(&self.probability_output).ok_or_else(|| {
            PredictError::inference(format!("No `{}` output", self.probability_output))
        })?;
        let (_, probs) = probs
            .try_extract_tensor::<f32>()
            .map_err(|e| PredictError::inference(format!("Extract probabilities error: {}", e)))?;
        let probabilities = probs.iter().map(|p| f64::from(*p)).collect();

        Ok(Classification {
            class_index,
            probabilities,
        })
    }

    fn class_count(&self) -> Option<usize> {
        None
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}
