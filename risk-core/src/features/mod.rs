//! Features Module - Feature Engineering
//!
//! Raw vitals → ordered, versioned feature vector.
//! Layout lives in `layout.rs`; derivation rules in `derive.rs`.

pub mod layout;
pub mod vector;
pub mod derive;

#[cfg(test)]
mod tests;

// Re-export common types
pub use layout::{
    FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, LayoutInfo, LayoutMismatchError,
    feature_index, feature_name, layout_hash, validate_layout,
};
pub use vector::{FeatureVector, ScaledVector};
pub use derive::{
    BmiCategory, RawObservation, bp_difference, count_risk_factors, derive,
    is_high_bp, is_high_heart_rate,
};
