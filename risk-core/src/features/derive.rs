//! Feature Derivation
//!
//! Eleven raw vitals in, sixteen ordered features out. Pure, no I/O.
//! Range checking is the caller's job; nothing here rejects input.

use serde::{Deserialize, Serialize};

use super::layout::FEATURE_COUNT;
use super::vector::FeatureVector;

// ============================================================================
// THRESHOLDS
// ============================================================================

/// BMI below this is Underweight
pub const BMI_NORMAL_MIN: f64 = 18.5;
/// BMI at or above this is Overweight (24.9 itself is Overweight)
pub const BMI_OVERWEIGHT_MIN: f64 = 24.9;
/// BMI at or above this is Obese (29.9 itself is Obese)
pub const BMI_OBESE_MIN: f64 = 29.9;

pub const HIGH_SYSTOLIC_BP: f64 = 140.0;
pub const HIGH_DIASTOLIC_BP: f64 = 90.0;
pub const HIGH_HEART_RATE: f64 = 100.0;

// ============================================================================
// RAW OBSERVATION
// ============================================================================

/// One patient's vitals at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    /// Years
    pub age: f64,
    /// mmHg
    pub systolic_bp: f64,
    /// mmHg
    pub diastolic_bp: f64,
    pub blood_sugar: f64,
    /// °F
    pub body_temp: f64,
    pub bmi: f64,
    pub previous_complications: u8,
    pub preexisting_diabetes: u8,
    pub gestational_diabetes: u8,
    pub mental_health: u8,
    /// bpm
    pub heart_rate: f64,
}

// ============================================================================
// BMI CATEGORY
// ============================================================================

/// BMI bucket as encoded at training time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Boundaries belong to the upper bucket: 24.9 is Overweight, 29.9 is Obese.
    /// This matches the fitted artifacts and must not be "corrected".
    /// NaN fails every comparison and lands in Obese; callers range-check first.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < BMI_NORMAL_MIN {
            BmiCategory::Underweight
        } else if bmi < BMI_OVERWEIGHT_MIN {
            BmiCategory::Normal
        } else if bmi < BMI_OBESE_MIN {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    /// Encoded value (0-3)
    pub fn index(&self) -> u8 {
        match self {
            BmiCategory::Underweight => 0,
            BmiCategory::Normal => 1,
            BmiCategory::Overweight => 2,
            BmiCategory::Obese => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// DERIVED FEATURES
// ============================================================================

/// Systolic minus diastolic; negative for malformed input, not rejected
pub fn bp_difference(systolic_bp: f64, diastolic_bp: f64) -> f64 {
    systolic_bp - diastolic_bp
}

pub fn is_high_bp(systolic_bp: f64, diastolic_bp: f64) -> bool {
    systolic_bp >= HIGH_SYSTOLIC_BP || diastolic_bp >= HIGH_DIASTOLIC_BP
}

pub fn is_high_heart_rate(heart_rate: f64) -> bool {
    heart_rate >= HIGH_HEART_RATE
}

/// Sum of the four binary indicators (0-4 for valid input)
pub fn count_risk_factors(observation: &RawObservation) -> u32 {
    u32::from(observation.previous_complications)
        + u32::from(observation.preexisting_diabetes)
        + u32::from(observation.gestational_diabetes)
        + u32::from(observation.mental_health)
}

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

/// Build the sixteen-feature vector in layout order
pub fn derive(observation: &RawObservation) -> FeatureVector {
    let o = observation;

    let values: [f64; FEATURE_COUNT] = [
        o.age,
        o.systolic_bp,
        o.diastolic_bp,
        o.blood_sugar,
        o.body_temp,
        o.bmi,
        f64::from(o.previous_complications),
        f64::from(o.preexisting_diabetes),
        f64::from(o.gestational_diabetes),
        f64::from(o.mental_health),
        o.heart_rate,
        bp_difference(o.systolic_bp, o.diastolic_bp),
        f64::from(BmiCategory::from_bmi(o.bmi).index()),
        flag(is_high_bp(o.systolic_bp, o.diastolic_bp)),
        flag(is_high_heart_rate(o.heart_rate)),
        f64::from(count_risk_factors(o)),
    ];

    FeatureVector::from_values(values)
}

// ============================================================================
// TESTS
// ============================================================================
