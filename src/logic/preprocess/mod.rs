//! Preprocess Module - Fitted Feature Preprocessor
//!
//! Applies the externally fitted encoding (numeric scaling + one-hot
//! categoricals) to a FeatureRecord. No fitting happens here; every
//! parameter comes from the preprocessor artifact.

pub mod artifact;
pub mod transform;

// Re-export common types
pub use artifact::{PreprocessorArtifact, NumericScaler};
pub use transform::{Preprocessor, TransformError};
