//! Artifacts Module - Trained State
//!
//! - `scaler.rs` - standardization parameters
//! - `codec.rs` - class index ↔ risk label
//! - `store.rs` - loads and owns everything for the process lifetime

pub mod scaler;
pub mod codec;
pub mod store;


// Re-export common types
pub use scaler::ScalingParameters;
pub use codec::{LabelCodec, LabelEncoderArtifact, RiskLevel, CANONICAL_CLASSES};
pub use store::{ArtifactFile, ArtifactInfo, ArtifactStore, StoreStatus};
