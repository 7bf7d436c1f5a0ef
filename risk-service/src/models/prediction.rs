//! Prediction request/response

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use pregnancy_risk_core::{PredictionResult, RawObservation};

/// Eleven vitals, range-checked before they reach the pipeline
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PredictionRequest {
    #[validate(range(min = 15.0, max = 50.0))]
    pub age: f64,
    #[validate(range(min = 80.0, max = 180.0))]
    pub systolic_bp: f64,
    #[validate(range(min = 40.0, max = 120.0))]
    pub diastolic_bp: f64,
    #[validate(range(min = 3.0, max = 15.0))]
    pub blood_sugar: f64,
    #[validate(range(min = 95.0, max = 104.0))]
    pub body_temp: f64,
    #[validate(range(min = 10.0, max = 50.0))]
    pub bmi: f64,
    #[validate(range(max = 1))]
    pub previous_complications: u8,
    #[validate(range(max = 1))]
    pub preexisting_diabetes: u8,
    #[validate(range(max = 1))]
    pub gestational_diabetes: u8,
    #[validate(range(max = 1))]
    pub mental_health: u8,
    #[validate(range(min = 40.0, max = 120.0))]
    pub heart_rate: f64,
}

impl From<&PredictionRequest> for RawObservation {
    fn from(req: &PredictionRequest) -> Self {
        RawObservation {
            age: req.age,
            systolic_bp: req.systolic_bp,
            diastolic_bp: req.diastolic_bp,
            blood_sugar: req.blood_sugar,
            body_temp: req.body_temp,
            bmi: req.bmi,
            previous_complications: req.previous_complications,
            preexisting_diabetes: req.preexisting_diabetes,
            gestational_diabetes: req.gestational_diabetes,
            mental_health: req.mental_health,
            heart_rate: req.heart_rate,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub risk_level: String,
    pub confidence: f64,
    pub probabilities: BTreeMap<String, f64>,
    pub explanation: String,
}

impl From<PredictionResult> for PredictionResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            risk_level: result.risk_level.to_string(),
            confidence: result.confidence,
            probabilities: result.probability_map(),
            explanation: result.explanation,
        }
    }
}
