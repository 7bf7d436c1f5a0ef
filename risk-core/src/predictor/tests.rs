//! End-to-end pipeline tests against the reference artifacts

use std::path::Path;

use super::{Predictor, PredictionResult};
use crate::artifacts::{ArtifactStore, LabelCodec, RiskLevel, ScalingParameters};
use crate::config::ArtifactConfig;
use crate::error::{ErrorKind, PredictError};
use crate::features::{RawObservation, ScaledVector, FEATURE_COUNT};
use crate::model::{Classification, Classifier};

fn reference_store() -> ArtifactStore {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join("reference");
    ArtifactStore::initialize(&ArtifactConfig::single(dir)).unwrap()
}

fn low_risk() -> RawObservation {
    RawObservation {
        age: 28.0,
        systolic_bp: 120.0,
        diastolic_bp: 80.0,
        blood_sugar: 7.0,
        body_temp: 98.6,
        bmi: 22.0,
        previous_complications: 0,
        preexisting_diabetes: 0,
        gestational_diabetes: 0,
        mental_health: 0,
        heart_rate: 75.0,
    }
}

fn high_risk() -> RawObservation {
    RawObservation {
        age: 32.0,
        systolic_bp: 145.0,
        diastolic_bp: 95.0,
        blood_sugar: 9.5,
        body_temp: 101.0,
        bmi: 32.5,
        previous_complications: 1,
        preexisting_diabetes: 1,
        gestational_diabetes: 1,
        mental_health: 1,
        heart_rate: 110.0,
    }
}

fn assert_probability_law(result: &PredictionResult) {
    let sum: f64 = result.probabilities.iter().map(|p| p.probability).sum();
    assert!((sum - 1.0).abs() < 1e-6, "probabilities sum to {}", sum);
    assert_eq!(result.probability_of(result.risk_level), Some(result.confidence));
    assert!((0.0..=1.0).contains(&result.confidence));
}

/// Classifier returning a fixed output, for contract-violation cases
#[derive(Debug)]
struct FixedClassifier(Classification);

impl Classifier for FixedClassifier {
    fn classify(&self, _input: &ScaledVector) -> Result<Classification, PredictError> {
        Ok(self.0.clone())
    }

    fn class_count(&self) -> Option<usize> {
        None
    }

    fn kind(&self) -> &'static str {
        "fixed"
    }
}

fn store_with(output: Classification, codec: Option<LabelCodec>) -> ArtifactStore {
    let scaler = ScalingParameters::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]);
    ArtifactStore::from_parts(Box::new(FixedClassifier(output)), scaler, codec).unwrap()
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_low_risk_scenario() {
    let store = reference_store();
    let result = Predictor::new(&store).predict(&low_risk()).unwrap();

    assert_eq!(result.risk_level, RiskLevel::Low);
    assert!(result.confidence >= 0.5);
    assert_eq!(
        result.explanation,
        "Risk Factors: 0 | BP Status: Normal | HR Status: Normal | BMI Category: Normal"
    );
    assert_probability_law(&result);
}

#[test]
fn test_high_risk_scenario() {
    let store = reference_store();
    let result = Predictor::new(&store).predict(&high_risk()).unwrap();

    assert_eq!(result.risk_level, RiskLevel::High);
    assert!(result.confidence >= 0.5);
    assert_eq!(
        result.explanation,
        "Risk Factors: 4 | BP Status: High | HR Status: Elevated | BMI Category: Obese"
    );
    assert_probability_law(&result);
}

#[test]
fn test_probabilities_follow_codec_order() {
    let store = reference_store();
    let result = Predictor::new(&store).predict(&low_risk()).unwrap();

    let labels: Vec<RiskLevel> = result.probabilities.iter().map(|p| p.label).collect();
    assert_eq!(labels, vec![RiskLevel::High, RiskLevel::Low]);

    let map = result.probability_map();
    assert_eq!(map.get("Low").copied(), result.probability_of(RiskLevel::Low));
}

#[test]
fn test_prediction_is_deterministic() {
    let store = reference_store();
    let predictor = Predictor::new(&store);

    for obs in [low_risk(), high_risk()] {
        assert_eq!(predictor.transform(&obs).unwrap(), predictor.transform(&obs).unwrap());
        assert_eq!(predictor.predict(&obs).unwrap(), predictor.predict(&obs).unwrap());
    }
}

#[test]
fn test_transform_uses_reference_scaler() {
    let store = reference_store();
    let scaled = Predictor::new(&store).transform(&low_risk()).unwrap();
    let scaler = store.scaler().unwrap();

    // age: (28 - mean) / scale
    let expected = (28.0 - scaler.mean[0]) / scaler.scale[0];
    assert_eq!(scaled.as_array()[0], expected);
}

#[test]
fn test_shared_store_across_threads() {
    let store = std::sync::Arc::new(reference_store());
    let expected = Predictor::new(&store).predict(&high_risk()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            std::thread::spawn(move || Predictor::new(&store).predict(&high_risk()).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_not_ready_store() {
    let store = ArtifactStore::unloaded();
    let predictor = Predictor::new(&store);

    let err = predictor.predict(&low_risk()).unwrap_err();
    assert!(matches!(err, PredictError::NotReady));
    assert_eq!(err.kind(), ErrorKind::NotReady);
    assert!(matches!(predictor.transform(&low_risk()), Err(PredictError::NotReady)));
}

#[test]
fn test_dimension_mismatch_is_surfaced() {
    let classifier = FixedClassifier(Classification {
        class_index: 0,
        probabilities: vec![1.0, 0.0],
    });
    let scaler = ScalingParameters::new(vec![0.0; 15], vec![1.0; 15]);
    let store = ArtifactStore::from_parts(Box::new(classifier), scaler, None).unwrap();

    match Predictor::new(&store).predict(&low_risk()) {
        Err(PredictError::DimensionMismatch { features, scaler }) => {
            assert_eq!(features, FEATURE_COUNT);
            assert_eq!(scaler, 15);
        }
        other => panic!("Expected DimensionMismatch, got {:?}", other),
    }
}

#[test]
fn test_out_of_range_class_index() {
    let store = store_with(
        Classification { class_index: 2, probabilities: vec![0.5, 0.5] },
        None,
    );

    let err = Predictor::new(&store).predict(&low_risk()).unwrap_err();
    assert!(matches!(err, PredictError::Decode { index: 2, known: 2 }));
    assert_eq!(err.kind(), ErrorKind::ContractViolation);
}

#[test]
fn test_probability_count_mismatch() {
    let store = store_with(
        Classification { class_index: 0, probabilities: vec![0.2, 0.3, 0.5] },
        None,
    );
    assert!(matches!(
        Predictor::new(&store).predict(&low_risk()),
        Err(PredictError::InvalidOutput(_))
    ));
}

#[test]
fn test_probabilities_not_summing_to_one() {
    let store = store_with(
        Classification { class_index: 0, probabilities: vec![0.7, 0.7] },
        None,
    );
    assert!(matches!(
        Predictor::new(&store).predict(&low_risk()),
        Err(PredictError::InvalidOutput(_))
    ));
}

#[test]
fn test_negative_probability_rejected() {
    let store = store_with(
        Classification { class_index: 0, probabilities: vec![1.5, -0.5] },
        None,
    );
    assert!(matches!(
        Predictor::new(&store).predict(&low_risk()),
        Err(PredictError::InvalidOutput(_))
    ));
}

#[test]
fn test_fallback_codec_decodes_index_zero_as_high() {
    let store = store_with(
        Classification { class_index: 0, probabilities: vec![0.8, 0.2] },
        None,
    );
    let result = Predictor::new(&store).predict(&low_risk()).unwrap();

    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.confidence, 0.8);
    assert_eq!(result.probability_of(RiskLevel::Low), Some(0.2));
}

#[test]
fn test_encoded_codec_order_respected() {
    let codec = LabelCodec::from_classes(vec![RiskLevel::Low, RiskLevel::High]).unwrap();
    let store = store_with(
        Classification { class_index: 0, probabilities: vec![0.9, 0.1] },
        Some(codec),
    );
    let result = Predictor::new(&store).predict(&high_risk()).unwrap();

    assert_eq!(result.risk_level, RiskLevel::Low);
    assert_eq!(result.probability_of(RiskLevel::High), Some(0.1));
    assert_probability_law(&result);
}
