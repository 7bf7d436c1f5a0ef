//! Explanation - human-readable summary of the inputs
//!
//! Descriptive only: built from the raw observation, never from the
//! classifier output, and never fed back into it.

use serde::{Deserialize, Serialize};

use crate::features::{count_risk_factors, is_high_bp, is_high_heart_rate, BmiCategory, RawObservation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub risk_factors: u32,
    pub high_bp: bool,
    pub high_heart_rate: bool,
    pub bmi_category: BmiCategory,
}

impl Explanation {
    pub fn from_observation(observation: &RawObservation) -> Self {
        Self {
            risk_factors: count_risk_factors(observation),
            high_bp: is_high_bp(observation.systolic_bp, observation.diastolic_bp),
            high_heart_rate: is_high_heart_rate(observation.heart_rate),
            bmi_category: BmiCategory::from_bmi(observation.bmi),
        }
    }

    pub fn bp_status(&self) -> &'static str {
        if self.high_bp { "High" } else { "Normal" }
    }

    pub fn hr_status(&self) -> &'static str {
        if self.high_heart_rate { "Elevated" } else { "Normal" }
    }
}

impl std::fmt::Display for Explanation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Risk Factors: {} | BP Status: {} | HR Status: {} | BMI Category: {}",
            self.risk_factors,
            self.bp_status(),
            self.hr_status(),
            self.bmi_category.name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation() -> RawObservation {
        RawObservation {
            age: 30.0,
            systolic_bp: 118.0,
            diastolic_bp: 76.0,
            blood_sugar: 6.5,
            body_temp: 98.4,
            bmi: 24.9,
            previous_complications: 1,
            preexisting_diabetes: 0,
            gestational_diabetes: 1,
            mental_health: 0,
            heart_rate: 88.0,
        }
    }

    #[test]
    fn test_explanation_format() {
        let text = Explanation::from_observation(&observation()).to_string();
        assert_eq!(
            text,
            "Risk Factors: 2 | BP Status: Normal | HR Status: Normal | BMI Category: Overweight"
        );
    }

    #[test]
    fn test_explanation_flags() {
        let obs = RawObservation { diastolic_bp: 90.0, heart_rate: 100.0, ..observation() };
        let explanation = Explanation::from_observation(&obs);

        assert_eq!(explanation.bp_status(), "High");
        assert_eq!(explanation.hr_status(), "Elevated");
    }
}
