//! Integration Tests for Feature Derivation
//!
//! Full observations through `derive`, checked position by position.

#[cfg(test)]
mod integration_tests {
    use crate::features::{derive, feature_index, RawObservation, FEATURE_COUNT};

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

    /// Raw fields occupy positions 0-10 in layout order
    #[test]
    fn test_raw_fields_in_layout_order() {
        let vector = derive(&high_risk());
        let v = vector.as_array();

        assert_eq!(v.len(), FEATURE_COUNT);
        assert_eq!(v[0], 32.0);
        assert_eq!(v[1], 145.0);
        assert_eq!(v[2], 95.0);
        assert_eq!(v[3], 9.5);
        assert_eq!(v[4], 101.0);
        assert_eq!(v[5], 32.5);
        assert_eq!(&v[6..10], &[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(v[10], 110.0);
    }

    #[test]
    fn test_low_risk_derived_features() {
        let vector = derive(&low_risk());

        assert_eq!(vector.get_by_name("bp_diff"), Some(40.0));
        assert_eq!(vector.get_by_name("bmi_cat"), Some(1.0));
        assert_eq!(vector.get_by_name("high_bp"), Some(0.0));
        assert_eq!(vector.get_by_name("high_hr"), Some(0.0));
        assert_eq!(vector.get_by_name("risk_factors"), Some(0.0));
    }

    #[test]
    fn test_high_risk_derived_features() {
        let vector = derive(&high_risk());

        assert_eq!(vector.get_by_name("bp_diff"), Some(50.0));
        assert_eq!(vector.get_by_name("bmi_cat"), Some(3.0));
        assert_eq!(vector.get_by_name("high_bp"), Some(1.0));
        assert_eq!(vector.get_by_name("high_hr"), Some(1.0));
        assert_eq!(vector.get_by_name("risk_factors"), Some(4.0));
    }

    /// BMI boundary values land in the upper bucket
    #[test]
    fn test_bmi_boundaries_through_derive() {
        let bmi_cat = feature_index("bmi_cat").unwrap();
        let cases = [(18.49, 0.0), (18.5, 1.0), (24.9, 2.0), (29.9, 3.0), (35.0, 3.0)];

        for (bmi, expected) in cases {
            let obs = RawObservation { bmi, ..low_risk() };
            assert_eq!(derive(&obs).as_array()[bmi_cat], expected, "bmi = {}", bmi);
        }
    }

    #[test]
    fn test_high_bp_boundaries_through_derive() {
        let high_bp = feature_index("high_bp").unwrap();
        let cases = [((139.0, 89.0), 0.0), ((140.0, 80.0), 1.0), ((120.0, 90.0), 1.0)];

        for ((systolic_bp, diastolic_bp), expected) in cases {
            let obs = RawObservation { systolic_bp, diastolic_bp, ..low_risk() };
            assert_eq!(derive(&obs).as_array()[high_bp], expected);
        }
    }

    #[test]
    fn test_derive_is_deterministic() {
        assert_eq!(derive(&high_risk()), derive(&high_risk()));
        assert!(derive(&low_risk()).validate().is_ok());
    }
}
